use serde::{Deserialize, Serialize};

/// Release asset the installer downloads when no override is configured.
pub const DEFAULT_REMOTE_URL: &str =
    "https://github.com/dxxxxy/EssentialCosmeticsUnlocker/releases/download/1.4.0/ecu-1.4.0.jar";

/// File name the downloaded jar is written under inside `mods/`.
pub const DEFAULT_REMOTE_FILENAME: &str = "ecu-1.4.0.jar";

/// Installer configuration from `Installer Config.yaml`
///
/// Contains the recognized overrides: target root, remote download source,
/// destination file name, and a preconfigured mod jar path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstallerConfig {
    #[serde(rename = "Installer_Settings")]
    pub settings: InstallerSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstallerSettings {
    /// Overrides the platform default `.minecraft` location when non-empty.
    #[serde(rename = "Target Root", default)]
    pub target_root: String,

    #[serde(rename = "Remote URL", default = "default_remote_url")]
    pub remote_url: String,

    #[serde(rename = "Remote Filename", default = "default_remote_filename")]
    pub remote_filename: String,

    /// Skips the mod jar picker when non-empty.
    #[serde(rename = "Mod Jar", default)]
    pub mod_jar: String,

    #[serde(rename = "Debug Mode", default)]
    pub debug_mode: bool,
}

impl Default for InstallerSettings {
    fn default() -> Self {
        Self {
            target_root: String::new(),
            remote_url: default_remote_url(),
            remote_filename: default_remote_filename(),
            mod_jar: String::new(),
            debug_mode: false,
        }
    }
}

impl Default for InstallerConfig {
    fn default() -> Self {
        Self {
            settings: InstallerSettings::default(),
        }
    }
}

fn default_remote_url() -> String {
    DEFAULT_REMOTE_URL.to_string()
}

fn default_remote_filename() -> String {
    DEFAULT_REMOTE_FILENAME.to_string()
}
