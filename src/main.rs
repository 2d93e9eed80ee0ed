//! Essential Installer - Mod installer for the Essential ecosystem
//!
//! Main entry point for the interactive installer.
//!
//! # Overview
//!
//! This binary wires up the pieces from the library crate:
//! - Configuration loading ([`ConfigManager`]) from `Essential Installer Data/`
//! - Logging infrastructure (rotating file + console output)
//! - State management ([`StateManager`])
//! - The interactive controller ([`InstallController`] with native dialogs)
//!
//! # Execution Flow
//!
//! 1. Load `Installer Config.yaml` (defaults when missing)
//! 2. Initialize logging → logs/essential-installer.<date>
//! 3. Create StateManager and seed it from the config
//! 4. Run the install workflow (blocks; dialogs drive the interaction)
//! 5. Log the metrics summary and exit
//!
//! A failed install is an expected, reported outcome and still exits 0;
//! only infrastructure errors (config or logging bootstrap) fail the
//! process.

use anyhow::Result;
use essential_installer::metrics::Metrics;
use essential_installer::ui::{InstallController, NativePrompter};
use essential_installer::{APP_NAME, ConfigManager, StateManager, VERSION};
use std::sync::Arc;

/// Directory holding the YAML configuration next to the executable.
const CONFIG_DIR: &str = "Essential Installer Data";

fn main() -> Result<()> {
    // Load configuration first so debug mode can raise the log level
    let config_manager = ConfigManager::new(CONFIG_DIR)?;
    let config = config_manager.load_config()?;

    // Setup logging with both file and console output.
    // The guard must stay alive until exit or buffered events are lost.
    let _guard = essential_installer::logging::setup_logging(
        "logs",
        APP_NAME,
        config.settings.debug_mode,
        true,
    )?;

    tracing::info!("Starting {} v{}", APP_NAME, VERSION);

    // Create state manager and seed it from the configuration
    let state_manager = Arc::new(StateManager::new());
    state_manager.load_from_config(&config);
    tracing::info!("State manager initialized");

    let metrics = Arc::new(Metrics::new());

    // Run the interactive workflow (blocks until the final dialog)
    let controller = InstallController::new(
        Arc::clone(&state_manager),
        NativePrompter::new(),
        Arc::clone(&metrics),
    );
    let outcome = controller.run();

    tracing::info!(
        "Workflow complete, success={}",
        outcome.is_success()
    );
    metrics.log_summary();

    Ok(())
}
