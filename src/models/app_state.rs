use camino::Utf8PathBuf;

/// Phases of the installation workflow.
///
/// The workflow moves strictly forward through these phases:
/// `Idle → ResolvingPath → Validating → Placing → Fetching → Reporting → Idle`.
/// A failure in any phase jumps straight to `Reporting`; there is no retry
/// and no rollback of steps that already completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InstallPhase {
    #[default]
    Idle,
    ResolvingPath,
    Validating,
    Placing,
    Fetching,
    Reporting,
}

impl InstallPhase {
    /// Short label for logs and status lines.
    pub fn as_str(&self) -> &'static str {
        match self {
            InstallPhase::Idle => "idle",
            InstallPhase::ResolvingPath => "resolving path",
            InstallPhase::Validating => "validating",
            InstallPhase::Placing => "placing",
            InstallPhase::Fetching => "fetching",
            InstallPhase::Reporting => "reporting",
        }
    }
}

/// Single source of truth for all application state.
///
/// Contains the current workflow phase, the paths the user has picked or the
/// resolver has found, download progress, and the last install outcome.
///
/// # Thread Safety
///
/// `AppState` is wrapped in `Arc<RwLock<AppState>>` by
/// [`crate::state::StateManager`]. Never access `AppState` directly; use
/// [`StateManager`](crate::state::StateManager) methods:
/// - [`read()`](crate::state::StateManager::read) for read-only access
/// - [`update()`](crate::state::StateManager::update) for mutations with automatic change events
#[derive(Clone, Debug)]
pub struct AppState {
    // Workflow position
    pub phase: InstallPhase,
    pub is_installing: bool,
    pub current_operation: String,

    // Resolved / picked paths
    pub target_root: Option<Utf8PathBuf>,
    pub mod_jar_path: Option<Utf8PathBuf>,
    pub unlocker_jar_path: Option<Utf8PathBuf>,

    // Download progress (bytes, not a cosmetic counter)
    pub bytes_downloaded: u64,
    pub total_bytes: Option<u64>,

    // Results of the current run
    pub placed_files: Vec<Utf8PathBuf>,
    pub last_failure: Option<String>,

    // Settings loaded from configuration
    pub remote_url: String,
    pub remote_filename: String,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            phase: InstallPhase::Idle,
            is_installing: false,
            current_operation: String::new(),

            target_root: None,
            mod_jar_path: None,
            unlocker_jar_path: None,

            bytes_downloaded: 0,
            total_bytes: None,

            placed_files: Vec::new(),
            last_failure: None,

            remote_url: String::new(),
            remote_filename: String::new(),
        }
    }
}

impl AppState {
    /// Check whether enough has been picked to start an install.
    pub fn is_ready_to_install(&self) -> bool {
        self.mod_jar_path.is_some() && !self.remote_url.is_empty()
    }

    /// Download progress as a percentage, when the total size is known.
    pub fn download_percent(&self) -> Option<u8> {
        let total = self.total_bytes?;
        if total == 0 {
            return None;
        }
        Some(((self.bytes_downloaded * 100) / total).min(100) as u8)
    }

    /// Reset everything tied to a single install run.
    pub fn reset_install_state(&mut self) {
        self.phase = InstallPhase::Idle;
        self.is_installing = false;
        self.current_operation.clear();
        self.bytes_downloaded = 0;
        self.total_bytes = None;
        self.placed_files.clear();
        self.last_failure = None;
    }

    /// Record a file that was written into place during this run.
    pub fn record_placed(&mut self, path: Utf8PathBuf) {
        self.placed_files.push(path);
    }
}
