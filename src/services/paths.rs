//! Target-root resolution for the install workflow.
//!
//! The installer looks for the game directory in the platform's well-known
//! location before ever asking the user: `%APPDATA%\.minecraft` on Windows,
//! `~/.minecraft` everywhere else. Resolution never creates anything; it only
//! reports what exists so the caller can decide whether to prompt.

use camino::{Utf8Path, Utf8PathBuf};
use directories::BaseDirs;

/// Name of the game directory under the platform base path.
const GAME_DIR_NAME: &str = ".minecraft";

/// Compute the platform default location of the game directory.
///
/// Returns `None` when the platform base directories cannot be resolved or
/// the path is not valid UTF-8. Existence is NOT checked here; use
/// [`resolve_target_root`] for that.
pub fn default_target_root() -> Option<Utf8PathBuf> {
    let base = BaseDirs::new()?;

    #[cfg(windows)]
    let parent = base.config_dir(); // AppData\Roaming

    #[cfg(not(windows))]
    let parent = base.home_dir();

    let root = parent.join(GAME_DIR_NAME);
    match Utf8PathBuf::try_from(root) {
        Ok(path) => Some(path),
        Err(e) => {
            tracing::warn!("Default game directory is not valid UTF-8: {}", e);
            None
        }
    }
}

/// Resolve the target root from an optional override.
///
/// The override wins when it points at an existing directory. Otherwise the
/// platform default is used if it exists. Returns `Err` with the path that
/// was checked last, so callers can show the user what was looked for.
pub fn resolve_target_root(override_root: Option<&Utf8Path>) -> Result<Utf8PathBuf, Utf8PathBuf> {
    if let Some(root) = override_root {
        if root.is_dir() {
            tracing::info!("Using configured target root: {}", root);
            return Ok(root.to_path_buf());
        }
        tracing::warn!("Configured target root does not exist: {}", root);
        return Err(root.to_path_buf());
    }

    match default_target_root() {
        Some(root) if root.is_dir() => {
            tracing::info!("Found game directory at {}", root);
            Ok(root)
        }
        Some(root) => {
            tracing::info!("Game directory not found at {}", root);
            Err(root)
        }
        None => Err(Utf8PathBuf::from(GAME_DIR_NAME)),
    }
}
