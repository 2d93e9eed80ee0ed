// Essential Installer - Mod installer for the Essential ecosystem
//
// This is the library crate containing the core workflow logic and data structures.
// The binary crate (main.rs) provides the interactive entry point.

pub mod config;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod services;
pub mod state;
pub mod ui;

// Re-export commonly used types for convenience
pub use config::ConfigManager;
pub use models::{AppState, InstallPhase, InstallerConfig};
pub use services::{InstallError, InstallOutcome, InstallRequest, InstallService};
pub use state::{StateChange, StateManager};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");
