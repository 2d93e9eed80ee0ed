//! Data models for the installer.
//!
//! This module contains the core data structures used throughout the application:
//! - [`AppState`]: The central state container holding the workflow phase, picked paths, and progress
//! - [`InstallPhase`]: The workflow phase machine (idle through reporting)
//! - [`InstallerConfig`]: Recognized overrides loaded from `Installer Config.yaml`
//!
//! # Architecture Note
//!
//! The models are designed to be:
//! - **Serializable**: Config structs derive `Serialize`/`Deserialize` for YAML persistence
//! - **Cloneable**: AppState is wrapped in `Arc<RwLock<>>` by [`StateManager`](crate::state::StateManager) for thread-safe access
//! - **Immutable**: State updates go through StateManager's `update()` method to ensure consistency

pub mod app_state;
pub mod config;

pub use app_state::{AppState, InstallPhase};
pub use config::{DEFAULT_REMOTE_FILENAME, DEFAULT_REMOTE_URL, InstallerConfig, InstallerSettings};
