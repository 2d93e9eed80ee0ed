//! Services module - Pure business logic for the install workflow.
//!
//! Everything here is **framework-agnostic**: no dialogs, no UI types, only
//! filesystem and network operations with explicit inputs and outputs. The
//! controller in [`crate::ui`] is the only layer that talks to the user.
//!
//! # Components
//!
//! - [`InstallService`]: Executes the workflow. Handles:
//!   - Deriving the destination layout from the target root ([`InstallService::plan`])
//!   - Copying the local mod jar into place ([`InstallService::place`])
//!   - Downloading the unlocker jar with byte-count progress ([`InstallService::run`])
//!
//! - [`paths`]: Finds the platform default game directory and resolves overrides.
//!
//! - [`download`]: Single blocking GET streamed to disk, timeouts on the agent.
//!
//! # Design Philosophy
//!
//! - **Pure**: No side effects beyond file I/O and the one HTTP request
//! - **Blocking**: The workflow is a linear sequence of synchronous calls
//! - **Testable**: No hidden dependencies, all inputs are explicit parameters

pub mod download;
pub mod install;
pub mod paths;

pub use download::FetchError;
pub use install::{
    InstallError, InstallOutcome, InstallPlan, InstallRequest, InstallService, InstallSummary,
};
pub use paths::{default_target_root, resolve_target_root};
