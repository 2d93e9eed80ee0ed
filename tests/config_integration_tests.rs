//! Integration tests for configuration loading and saving
//!
//! These tests verify:
//! - Defaults when no file exists
//! - YAML round trips
//! - Partial files falling back to defaults per key
//! - Seeding application state from a loaded config

use camino::Utf8PathBuf;
use essential_installer::models::{DEFAULT_REMOTE_FILENAME, DEFAULT_REMOTE_URL, InstallerConfig};
use essential_installer::{ConfigManager, StateManager};
use tempfile::TempDir;

fn manager_in_temp_dir() -> (ConfigManager, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let dir = Utf8PathBuf::try_from(temp_dir.path().to_path_buf()).unwrap();
    let manager = ConfigManager::new(&dir).unwrap();
    (manager, temp_dir)
}

#[test]
fn test_defaults_when_no_file_exists() {
    let (manager, _temp_dir) = manager_in_temp_dir();

    let config = manager.load_config().unwrap();

    assert_eq!(config.settings.remote_url, DEFAULT_REMOTE_URL);
    assert_eq!(config.settings.remote_filename, DEFAULT_REMOTE_FILENAME);
    assert!(config.settings.target_root.is_empty());
    assert!(config.settings.mod_jar.is_empty());
    assert!(!config.settings.debug_mode);
}

#[test]
fn test_round_trip_preserves_overrides() {
    let (manager, _temp_dir) = manager_in_temp_dir();

    let mut config = InstallerConfig::default();
    config.settings.target_root = "/games/.minecraft".to_string();
    config.settings.remote_url = "https://mirror.example.com/ecu.jar".to_string();
    config.settings.remote_filename = "unlocker.jar".to_string();
    config.settings.mod_jar = "/downloads/Essential.jar".to_string();

    manager.save_config(&config).unwrap();
    let loaded = manager.load_config().unwrap();

    assert_eq!(loaded.settings.target_root, "/games/.minecraft");
    assert_eq!(
        loaded.settings.remote_url,
        "https://mirror.example.com/ecu.jar"
    );
    assert_eq!(loaded.settings.remote_filename, "unlocker.jar");
    assert_eq!(loaded.settings.mod_jar, "/downloads/Essential.jar");
}

#[test]
fn test_partial_file_falls_back_per_key() {
    let temp_dir = TempDir::new().unwrap();
    let dir = Utf8PathBuf::try_from(temp_dir.path().to_path_buf()).unwrap();
    std::fs::write(
        dir.join("Installer Config.yaml"),
        "Installer_Settings:\n  Debug Mode: true\n",
    )
    .unwrap();

    let manager = ConfigManager::new(&dir).unwrap();
    let config = manager.load_config().unwrap();

    assert!(config.settings.debug_mode);
    assert_eq!(config.settings.remote_url, DEFAULT_REMOTE_URL);
    assert_eq!(config.settings.remote_filename, DEFAULT_REMOTE_FILENAME);
}

#[test]
fn test_malformed_file_is_an_error() {
    let temp_dir = TempDir::new().unwrap();
    let dir = Utf8PathBuf::try_from(temp_dir.path().to_path_buf()).unwrap();
    std::fs::write(dir.join("Installer Config.yaml"), ":: not yaml ::").unwrap();

    let manager = ConfigManager::new(&dir).unwrap();
    assert!(manager.load_config().is_err());
}

#[test]
fn test_state_seeded_from_config() {
    let mut config = InstallerConfig::default();
    config.settings.target_root = "/games/.minecraft".to_string();
    config.settings.mod_jar = "/downloads/Essential.jar".to_string();

    let state = StateManager::new();
    state.load_from_config(&config);

    let snapshot = state.snapshot();
    assert_eq!(
        snapshot.target_root,
        Some(Utf8PathBuf::from("/games/.minecraft"))
    );
    assert_eq!(
        snapshot.mod_jar_path,
        Some(Utf8PathBuf::from("/downloads/Essential.jar"))
    );
    assert_eq!(snapshot.remote_url, DEFAULT_REMOTE_URL);
    assert!(snapshot.is_ready_to_install());
}

#[test]
fn test_empty_config_paths_stay_unset() {
    let state = StateManager::new();
    state.load_from_config(&InstallerConfig::default());

    let snapshot = state.snapshot();
    assert!(snapshot.target_root.is_none());
    assert!(snapshot.mod_jar_path.is_none());
}
