// Interaction boundary - every dialog the installer ever shows.
//
// The workflow core never talks to the user directly; it goes through the
// InstallPrompter trait. The native implementation uses rfd dialogs, tests
// substitute scripted implementations.

use crate::services::InstallOutcome;
use camino::Utf8PathBuf;

/// The complete user-facing surface of the installer.
///
/// Three prompts and one terminal notification:
/// - two "pick a jar" file dialogs (the mod jar and the unlocker jar)
/// - one confirm-then-pick-directory pair for a missing install directory
/// - one success/error report at the end of the run
pub trait InstallPrompter {
    /// Ask the user for a jar file. `None` when the dialog is cancelled.
    fn pick_jar(&self, title: &str) -> Option<Utf8PathBuf>;

    /// Ask the user for a directory. `None` when the dialog is cancelled.
    fn pick_directory(&self, title: &str) -> Option<Utf8PathBuf>;

    /// Yes/no question, used before offering the directory picker.
    fn confirm(&self, title: &str, message: &str) -> bool;

    /// Terminal notification: installed, or failed with a reason.
    fn report(&self, outcome: &InstallOutcome);
}

/// Native dialogs via the `rfd` crate.
pub struct NativePrompter;

impl NativePrompter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for NativePrompter {
    fn default() -> Self {
        Self::new()
    }
}

impl InstallPrompter for NativePrompter {
    fn pick_jar(&self, title: &str) -> Option<Utf8PathBuf> {
        rfd::FileDialog::new()
            .set_title(title)
            .add_filter("JAR files", &["jar"])
            .pick_file()
            .and_then(|path| {
                Utf8PathBuf::try_from(path)
                    .map_err(|e| {
                        tracing::error!("Failed to convert path to UTF-8: {}", e);
                        e
                    })
                    .ok()
            })
    }

    fn pick_directory(&self, title: &str) -> Option<Utf8PathBuf> {
        rfd::FileDialog::new()
            .set_title(title)
            .pick_folder()
            .and_then(|path| {
                Utf8PathBuf::try_from(path)
                    .map_err(|e| {
                        tracing::error!("Failed to convert path to UTF-8: {}", e);
                        e
                    })
                    .ok()
            })
    }

    fn confirm(&self, title: &str, message: &str) -> bool {
        let result = rfd::MessageDialog::new()
            .set_level(rfd::MessageLevel::Warning)
            .set_title(title)
            .set_description(message)
            .set_buttons(rfd::MessageButtons::YesNo)
            .show();
        matches!(result, rfd::MessageDialogResult::Yes)
    }

    fn report(&self, outcome: &InstallOutcome) {
        match outcome {
            InstallOutcome::Success(summary) => {
                rfd::MessageDialog::new()
                    .set_level(rfd::MessageLevel::Info)
                    .set_title("Success")
                    .set_description(format!(
                        "Mods installed successfully into {}",
                        summary.mods_dir
                    ))
                    .set_buttons(rfd::MessageButtons::Ok)
                    .show();
            }
            InstallOutcome::Failure { reason } => {
                rfd::MessageDialog::new()
                    .set_level(rfd::MessageLevel::Error)
                    .set_title("Error")
                    .set_description(format!("Installation failed: {}", reason))
                    .set_buttons(rfd::MessageButtons::Ok)
                    .show();
            }
        }
    }
}
