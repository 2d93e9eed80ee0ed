// State management module
//
// This module provides the StateManager which wraps AppState with thread-safe access
// using Arc<RwLock<T>> and emits change events for observers.

use crate::models::{AppState, InstallPhase};
use camino::Utf8PathBuf;
use std::sync::{Arc, RwLock};
use tokio::sync::broadcast;

/// Change events emitted when state is modified
///
/// These events notify interested parties (UI, tests) about state changes
/// without requiring them to poll the state.
#[derive(Clone, Debug, PartialEq)]
pub enum StateChange {
    /// The workflow moved to a new phase
    PhaseChanged { phase: InstallPhase },

    /// An install run has started
    InstallStarted,

    /// An install run has finished
    InstallFinished { success: bool },

    /// Download progress has advanced
    DownloadProgress {
        bytes_downloaded: u64,
        total_bytes: Option<u64>,
    },

    /// Current operation description has changed
    OperationChanged { operation: String },

    /// Picked paths or settings have been updated
    ConfigurationChanged { is_ready: bool },

    /// State has been reset
    StateReset,
}

/// Thread-safe state manager with event emission
///
/// This is the central state management component that:
/// - Provides thread-safe access to [`AppState`] via `Arc<RwLock<T>>`
/// - Detects state changes and emits [`StateChange`] events
/// - Supports subscribing to state changes via broadcast channels
///
/// # Usage
///
/// Always use `StateManager` instead of accessing [`AppState`] directly:
/// - [`read()`](Self::read) for reading state without holding locks
/// - [`update()`](Self::update) for mutations with automatic event emission
/// - [`subscribe()`](Self::subscribe) for listening to state changes
pub struct StateManager {
    /// The application state protected by RwLock for thread-safe access
    state: Arc<RwLock<AppState>>,

    /// Broadcast channel for emitting state change events
    /// Multiple subscribers can listen for state changes
    state_tx: broadcast::Sender<StateChange>,
}

impl StateManager {
    /// Create a new StateManager with default state
    ///
    /// # Returns
    /// A new StateManager with a broadcast channel buffer of 100 events
    pub fn new() -> Self {
        let (state_tx, _) = broadcast::channel(100);
        Self {
            state: Arc::new(RwLock::new(AppState::default())),
            state_tx,
        }
    }

    /// Get a read-only snapshot of the current state
    ///
    /// This clones the entire state, so it's safe to use without holding locks.
    pub fn snapshot(&self) -> AppState {
        self.state.read().unwrap().clone()
    }

    /// Execute a function with read access to the state
    ///
    /// # Example
    /// ```ignore
    /// let phase = state_manager.read(|state| state.phase);
    /// ```
    pub fn read<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&AppState) -> R,
    {
        let state = self.state.read().unwrap();
        f(&state)
    }

    /// Update the state and emit change events
    ///
    /// This is the primary way to modify state. It:
    /// 1. Captures the old state
    /// 2. Applies the update function
    /// 3. Detects what changed
    /// 4. Emits appropriate events
    ///
    /// # Returns
    /// A vector of StateChange events that were emitted
    pub fn update<F>(&self, update_fn: F) -> Vec<StateChange>
    where
        F: FnOnce(&mut AppState),
    {
        let mut state = self.state.write().unwrap();
        let old_state = state.clone();

        // Apply the update
        update_fn(&mut state);

        // Detect changes and emit events
        let changes = self.detect_changes(&old_state, &state);

        for change in &changes {
            // Ignore send errors - it's OK if no one is listening
            let _ = self.state_tx.send(change.clone());
        }

        changes
    }

    /// Subscribe to state change events
    ///
    /// Returns a receiver that will get notified of all future state changes.
    /// Multiple subscribers can listen simultaneously.
    pub fn subscribe(&self) -> broadcast::Receiver<StateChange> {
        self.state_tx.subscribe()
    }

    /// Detect what changed between two states and generate events
    fn detect_changes(&self, old: &AppState, new: &AppState) -> Vec<StateChange> {
        let mut changes = Vec::new();

        // Install run start/stop
        if old.is_installing != new.is_installing {
            if new.is_installing {
                changes.push(StateChange::InstallStarted);
            } else {
                changes.push(StateChange::InstallFinished {
                    success: new.last_failure.is_none(),
                });
            }
        }

        // Phase transitions
        if old.phase != new.phase {
            changes.push(StateChange::PhaseChanged { phase: new.phase });
        }

        // Download progress
        if old.bytes_downloaded != new.bytes_downloaded || old.total_bytes != new.total_bytes {
            changes.push(StateChange::DownloadProgress {
                bytes_downloaded: new.bytes_downloaded,
                total_bytes: new.total_bytes,
            });
        }

        // Operation description
        if old.current_operation != new.current_operation {
            changes.push(StateChange::OperationChanged {
                operation: new.current_operation.clone(),
            });
        }

        // Picked paths and settings
        if old.target_root != new.target_root
            || old.mod_jar_path != new.mod_jar_path
            || old.unlocker_jar_path != new.unlocker_jar_path
            || old.remote_url != new.remote_url
            || old.remote_filename != new.remote_filename
        {
            changes.push(StateChange::ConfigurationChanged {
                is_ready: new.is_ready_to_install(),
            });
        }

        changes
    }

    // Convenience methods for common state updates

    /// Set the resolved target root
    pub fn set_target_root(&self, path: Option<Utf8PathBuf>) -> Vec<StateChange> {
        self.update(|state| {
            state.target_root = path.clone();
        })
    }

    /// Set the mod jar the user picked
    pub fn set_mod_jar_path(&self, path: Option<Utf8PathBuf>) -> Vec<StateChange> {
        self.update(|state| {
            state.mod_jar_path = path.clone();
        })
    }

    /// Set the unlocker jar the user picked
    pub fn set_unlocker_jar_path(&self, path: Option<Utf8PathBuf>) -> Vec<StateChange> {
        self.update(|state| {
            state.unlocker_jar_path = path.clone();
        })
    }

    /// Move the workflow into a new phase with an operation description
    pub fn set_phase(&self, phase: InstallPhase, operation: &str) -> Vec<StateChange> {
        self.update(|state| {
            state.phase = phase;
            state.current_operation = operation.to_string();
        })
    }

    /// Begin an install run
    pub fn begin_install(&self) -> Vec<StateChange> {
        self.update(|state| {
            state.is_installing = true;
            state.phase = InstallPhase::ResolvingPath;
            state.current_operation = "Locating install directory...".to_string();
            state.bytes_downloaded = 0;
            state.total_bytes = None;
            state.placed_files.clear();
            state.last_failure = None;
        })
    }

    /// Finish an install run, recording the failure reason if any
    pub fn finish_install(&self, failure: Option<String>) -> Vec<StateChange> {
        self.update(|state| {
            state.last_failure = failure;
            state.is_installing = false;
            state.phase = InstallPhase::Idle;
            state.current_operation.clear();
        })
    }

    /// Update download progress with real byte counts
    pub fn update_download_progress(
        &self,
        bytes_downloaded: u64,
        total_bytes: Option<u64>,
    ) -> Vec<StateChange> {
        self.update(|state| {
            state.bytes_downloaded = bytes_downloaded;
            state.total_bytes = total_bytes;
        })
    }

    /// Record a file written into place during the current run
    pub fn record_placed_file(&self, path: Utf8PathBuf) -> Vec<StateChange> {
        self.update(|state| {
            state.record_placed(path.clone());
        })
    }

    /// Reset all install-related state
    pub fn reset_install_state(&self) -> Vec<StateChange> {
        let mut changes = self.update(|state| {
            state.reset_install_state();
        });

        // Emit a reset event
        let reset_event = StateChange::StateReset;
        let _ = self.state_tx.send(reset_event.clone());
        changes.push(reset_event);

        changes
    }

    /// Load settings from the installer configuration
    ///
    /// This populates AppState fields from the configuration file: remote
    /// download source, destination file name, and optional path overrides.
    pub fn load_from_config(&self, config: &crate::models::InstallerConfig) -> Vec<StateChange> {
        self.update(|state| {
            let settings = &config.settings;

            if !settings.target_root.is_empty() {
                state.target_root = Some(Utf8PathBuf::from(&settings.target_root));
            }

            if !settings.mod_jar.is_empty() {
                state.mod_jar_path = Some(Utf8PathBuf::from(&settings.mod_jar));
            }

            state.remote_url = settings.remote_url.clone();
            state.remote_filename = settings.remote_filename.clone();

            tracing::info!(
                "Loaded config: target_root={}, mod_jar={}, remote={}",
                state.target_root.as_deref().map(|p| p.as_str()).unwrap_or("<default>"),
                state.mod_jar_path.as_deref().map(|p| p.as_str()).unwrap_or("<prompt>"),
                state.remote_url
            );
        })
    }

    /// Get an Arc reference to the state for use in worker threads
    pub fn state_arc(&self) -> Arc<RwLock<AppState>> {
        Arc::clone(&self.state)
    }
}

impl Default for StateManager {
    fn default() -> Self {
        Self::new()
    }
}

// Make StateManager cloneable for sharing across threads
impl Clone for StateManager {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            state_tx: self.state_tx.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_manager() {
        let manager = StateManager::new();
        let state = manager.snapshot();

        assert!(!state.is_installing);
        assert_eq!(state.phase, InstallPhase::Idle);
        assert_eq!(state.bytes_downloaded, 0);
    }

    #[test]
    fn test_begin_install_events() {
        let manager = StateManager::new();

        let changes = manager.begin_install();

        assert!(changes.contains(&StateChange::InstallStarted));
        assert!(changes.contains(&StateChange::PhaseChanged {
            phase: InstallPhase::ResolvingPath
        }));

        let state = manager.snapshot();
        assert!(state.is_installing);
        assert_eq!(state.phase, InstallPhase::ResolvingPath);
    }

    #[test]
    fn test_finish_install_success_flag() {
        let manager = StateManager::new();
        manager.begin_install();

        let changes = manager.finish_install(None);
        assert!(changes.contains(&StateChange::InstallFinished { success: true }));

        manager.begin_install();
        let changes = manager.finish_install(Some("network down".to_string()));
        assert!(changes.contains(&StateChange::InstallFinished { success: false }));
        assert_eq!(
            manager.read(|s| s.last_failure.clone()),
            Some("network down".to_string())
        );
    }

    #[test]
    fn test_phase_transition_events() {
        let manager = StateManager::new();

        let changes = manager.set_phase(InstallPhase::Validating, "Checking sources");

        assert!(changes.contains(&StateChange::PhaseChanged {
            phase: InstallPhase::Validating
        }));
        assert!(changes.contains(&StateChange::OperationChanged {
            operation: "Checking sources".to_string()
        }));
    }

    #[test]
    fn test_download_progress_events() {
        let manager = StateManager::new();

        let changes = manager.update_download_progress(512, Some(2048));

        assert_eq!(
            changes,
            vec![StateChange::DownloadProgress {
                bytes_downloaded: 512,
                total_bytes: Some(2048),
            }]
        );
        assert_eq!(manager.read(|s| s.download_percent()), Some(25));
    }

    #[test]
    fn test_configuration_change_events() {
        let manager = StateManager::new();

        let changes = manager.set_mod_jar_path(Some(Utf8PathBuf::from("/tmp/Essential.jar")));
        assert!(matches!(
            changes[0],
            StateChange::ConfigurationChanged { is_ready: false }
        ));

        // Ready once the remote URL is known too
        let changes = manager.update(|s| {
            s.remote_url = "https://example.com/ecu.jar".to_string();
        });
        assert!(matches!(
            changes[0],
            StateChange::ConfigurationChanged { is_ready: true }
        ));
    }

    #[test]
    fn test_load_from_config() {
        use crate::models::InstallerConfig;

        let manager = StateManager::new();
        let mut config = InstallerConfig::default();
        config.settings.target_root = "/games/minecraft".to_string();

        manager.load_from_config(&config);

        let state = manager.snapshot();
        assert_eq!(
            state.target_root,
            Some(Utf8PathBuf::from("/games/minecraft"))
        );
        assert_eq!(state.remote_filename, "ecu-1.4.0.jar");
        assert!(state.mod_jar_path.is_none());
    }

    #[test]
    fn test_reset_install_state() {
        let manager = StateManager::new();
        manager.begin_install();
        manager.record_placed_file(Utf8PathBuf::from("/mc/mods/Essential.jar"));

        let changes = manager.reset_install_state();

        assert!(changes.contains(&StateChange::StateReset));

        let state = manager.snapshot();
        assert!(!state.is_installing);
        assert_eq!(state.phase, InstallPhase::Idle);
        assert!(state.placed_files.is_empty());
    }

    #[test]
    fn test_subscribe_to_changes() {
        let manager = StateManager::new();
        let mut rx = manager.subscribe();

        manager.begin_install();

        let event = rx.try_recv();
        assert!(event.is_ok());
        assert_eq!(event.unwrap(), StateChange::InstallStarted);
    }

    #[test]
    fn test_multiple_subscribers() {
        let manager = StateManager::new();
        let mut rx1 = manager.subscribe();
        let mut rx2 = manager.subscribe();

        manager.begin_install();

        assert!(rx1.try_recv().is_ok());
        assert!(rx2.try_recv().is_ok());
    }

    #[test]
    fn test_read_with_closure() {
        let manager = StateManager::new();
        manager.update(|state| {
            state.bytes_downloaded = 42;
        });

        let bytes = manager.read(|state| state.bytes_downloaded);
        assert_eq!(bytes, 42);
    }

    #[test]
    fn test_clone_state_manager() {
        let manager1 = StateManager::new();
        let manager2 = manager1.clone();

        manager1.update(|state| {
            state.bytes_downloaded = 10;
        });

        let state = manager2.snapshot();
        assert_eq!(state.bytes_downloaded, 10);
    }
}
