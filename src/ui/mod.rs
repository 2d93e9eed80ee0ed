// UI module - the interaction boundary and its orchestration
//
// This module contains:
// - InstallPrompter: the trait behind which every dialog lives, plus the
//   native rfd-backed implementation
// - InstallController: wires prompts, state, and the install service into
//   one interactive run

pub mod controller;
pub mod prompt;

pub use controller::InstallController;
pub use prompt::{InstallPrompter, NativePrompter};
