// Install controller - wires the interaction boundary to the workflow.
//
// This module contains the InstallController which coordinates between:
// - InstallPrompter (dialogs)
// - StateManager (application state)
// - InstallService (business logic)
//
// It owns the complete interactive sequence: resolve the install directory
// (prompting when the default is missing), collect the source jars, run the
// install, and report the outcome.

use crate::metrics::Metrics;
use crate::models::InstallPhase;
use crate::services::{
    self, InstallError, InstallOutcome, InstallRequest, InstallService, InstallSummary,
};
use crate::state::StateManager;
use crate::ui::prompt::InstallPrompter;
use camino::Utf8PathBuf;
use std::sync::Arc;
use std::time::Instant;

/// Coordinates one interactive install run from first prompt to final dialog.
///
/// The controller is the only component that talks to the prompter. Services
/// stay dialog-free so they can be exercised directly in tests. Configured
/// paths (target root, mod jar) are read from state, where
/// [`StateManager::load_from_config`] put them, and suppress the matching
/// prompts.
pub struct InstallController<P: InstallPrompter> {
    state: Arc<StateManager>,
    service: InstallService,
    prompter: P,
    metrics: Arc<Metrics>,
}

impl<P: InstallPrompter> InstallController<P> {
    pub fn new(state: Arc<StateManager>, prompter: P, metrics: Arc<Metrics>) -> Self {
        Self {
            state,
            service: InstallService::new(),
            prompter,
            metrics,
        }
    }

    /// Run the full workflow and report the outcome to the user.
    ///
    /// Every failure is an expected, reported result; this method only
    /// returns the outcome, it never propagates workflow errors.
    pub fn run(&self) -> InstallOutcome {
        let started = Instant::now();
        self.state.begin_install();

        let result = self.execute();
        let outcome = InstallOutcome::from_result(result);

        self.state
            .set_phase(InstallPhase::Reporting, "Reporting result...");
        self.prompter.report(&outcome);

        match &outcome {
            InstallOutcome::Success(summary) => {
                tracing::info!(
                    "Install finished: {} and {} in place",
                    summary.placed_path,
                    summary.fetched_path
                );
                self.metrics.record_install_succeeded();
                self.metrics.record_files_placed(2);
                self.metrics
                    .record_bytes_downloaded(summary.bytes_downloaded);
                self.state.finish_install(None);
            }
            InstallOutcome::Failure { reason } => {
                tracing::warn!("Install failed: {}", reason);
                self.metrics.record_install_failed();
                self.state.finish_install(Some(reason.clone()));
            }
        }
        self.metrics.record_install_time(started.elapsed());

        outcome
    }

    /// The fallible part of the workflow: resolve, gather, install.
    fn execute(&self) -> Result<InstallSummary, InstallError> {
        let target_root = self.resolve_target_root()?;
        let (local_source_path, unlocker_source_path) = self.gather_sources()?;

        let snapshot = self.state.snapshot();
        let request = InstallRequest {
            local_source_path,
            unlocker_source_path,
            remote_source_url: snapshot.remote_url,
            remote_filename: snapshot.remote_filename,
            target_root: Some(target_root),
        };

        self.service.run(&request, &self.state)
    }

    /// Resolve the install directory, prompting when nothing is found.
    ///
    /// The configured override wins when it exists. When neither it nor the
    /// platform default is present, the user is asked once whether they want
    /// to point at the directory themselves; declining, cancelling the
    /// picker, or picking a path that does not exist ends the run.
    fn resolve_target_root(&self) -> Result<Utf8PathBuf, InstallError> {
        self.state
            .set_phase(InstallPhase::ResolvingPath, "Locating install directory...");

        let override_root = self.state.read(|s| s.target_root.clone());
        let missing = match services::resolve_target_root(override_root.as_deref()) {
            Ok(root) => return Ok(root),
            Err(missing) => missing,
        };

        let wants_to_pick = self.prompter.confirm(
            "Path Not Found",
            &format!(
                "We did not find your Minecraft path at {}. Would you like to select it?",
                missing
            ),
        );
        if !wants_to_pick {
            return Err(InstallError::UserDeclined);
        }

        match self
            .prompter
            .pick_directory("Select the Minecraft directory")
        {
            Some(dir) if dir.is_dir() => {
                tracing::info!("User selected install directory: {}", dir);
                Ok(dir)
            }
            Some(dir) => Err(InstallError::PathNotFound(dir)),
            None => Err(InstallError::UserDeclined),
        }
    }

    /// Collect the source jars, preferring configured paths over prompts.
    ///
    /// The mod jar is required; cancelling its picker ends the run. The
    /// unlocker jar is optional since the downloaded copy supersedes it.
    fn gather_sources(&self) -> Result<(Utf8PathBuf, Option<Utf8PathBuf>), InstallError> {
        let preconfigured = self.state.read(|s| s.mod_jar_path.clone());
        let mod_jar = match preconfigured {
            Some(path) => path,
            None => {
                let picked = self
                    .prompter
                    .pick_jar("Select the Essential Mod (fabric) jar")
                    .ok_or(InstallError::UserDeclined)?;
                self.state.set_mod_jar_path(Some(picked.clone()));
                picked
            }
        };

        let unlocker_jar = self
            .state
            .read(|s| s.unlocker_jar_path.clone())
            .or_else(|| {
                let picked = self.prompter.pick_jar("Select your cosmetics unlocker jar");
                if let Some(path) = &picked {
                    self.state.set_unlocker_jar_path(Some(path.clone()));
                }
                picked
            });

        Ok((mod_jar, unlocker_jar))
    }
}
