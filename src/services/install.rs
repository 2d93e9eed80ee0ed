use crate::models::InstallPhase;
use crate::services::download::{self, FetchError};
use crate::services::paths;
use crate::state::StateManager;
use camino::{Utf8Path, Utf8PathBuf};
use std::fs;
use thiserror::Error;

/// One install request: what to copy, what to download, and where.
#[derive(Debug, Clone)]
pub struct InstallRequest {
    /// Local mod jar copied into `mods/`, keeping its file name.
    pub local_source_path: Utf8PathBuf,

    /// Locally picked unlocker jar. Validated when present, but the
    /// downloaded copy always supersedes it.
    pub unlocker_source_path: Option<Utf8PathBuf>,

    /// URL the unlocker jar is fetched from.
    pub remote_source_url: String,

    /// File name the download is written under inside `mods/`.
    pub remote_filename: String,

    /// Install root. Falls back to the platform default when `None`.
    pub target_root: Option<Utf8PathBuf>,
}

/// Destination layout derived from the resolved target root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallPlan {
    pub mods_dir: Utf8PathBuf,
    pub essential_dir: Utf8PathBuf,
    pub remote_dest_path: Utf8PathBuf,
}

/// What a successful run produced.
#[derive(Debug, Clone)]
pub struct InstallSummary {
    pub mods_dir: Utf8PathBuf,
    pub placed_path: Utf8PathBuf,
    pub fetched_path: Utf8PathBuf,
    pub bytes_downloaded: u64,
}

/// Terminal outcome of one install run, handed to the reporting boundary.
#[derive(Debug, Clone)]
pub enum InstallOutcome {
    Success(InstallSummary),
    Failure { reason: String },
}

impl InstallOutcome {
    pub fn from_result(result: Result<InstallSummary, InstallError>) -> Self {
        match result {
            Ok(summary) => InstallOutcome::Success(summary),
            Err(e) => InstallOutcome::Failure {
                reason: e.to_string(),
            },
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, InstallOutcome::Success(_))
    }
}

/// Errors that can occur during an install
///
/// Every variant is terminal for the current run; nothing is retried.
#[derive(Error, Debug)]
pub enum InstallError {
    #[error("source file does not exist or is not a file: {0}")]
    InvalidSourcePath(Utf8PathBuf),

    #[error("install directory not found: {0}")]
    PathNotFound(Utf8PathBuf),

    #[error("failed to create {path}: {source}")]
    CreateDirFailed {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to copy {path}: {source}")]
    CopyFailed {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("download failed: {0}")]
    FetchFailed(#[from] FetchError),

    #[error("install cancelled: no install directory was supplied")]
    UserDeclined,
}

/// Service executing the install workflow
///
/// Owns the HTTP agent so connection settings are built once per process.
/// All operations are synchronous and take explicit parameters; the service
/// holds no per-run state and is reusable across runs.
pub struct InstallService {
    agent: ureq::Agent,
}

impl InstallService {
    pub fn new() -> Self {
        Self {
            agent: download::build_agent(),
        }
    }

    /// Validate the request and derive the destination layout.
    ///
    /// Sources are checked before anything is created, so a failing plan
    /// leaves the filesystem untouched. Directory creation is idempotent;
    /// planning twice against the same root is not an error.
    pub fn plan(&self, request: &InstallRequest) -> Result<InstallPlan, InstallError> {
        ensure_source_file(&request.local_source_path)?;
        if let Some(extra) = &request.unlocker_source_path {
            ensure_source_file(extra)?;
        }

        let root = match &request.target_root {
            Some(root) => root.clone(),
            None => paths::default_target_root()
                .ok_or_else(|| InstallError::PathNotFound(Utf8PathBuf::from(".minecraft")))?,
        };
        if !root.is_dir() {
            return Err(InstallError::PathNotFound(root));
        }

        let mods_dir = root.join("mods");
        let essential_dir = root.join("essential");

        for dir in [&mods_dir, &essential_dir] {
            fs::create_dir_all(dir).map_err(|source| InstallError::CreateDirFailed {
                path: dir.clone(),
                source,
            })?;
        }

        tracing::debug!("Planned install into {}", root);

        Ok(InstallPlan {
            remote_dest_path: mods_dir.join(&request.remote_filename),
            mods_dir,
            essential_dir,
        })
    }

    /// Copy `source` into `dest_dir`, keeping the file name.
    ///
    /// Overwrites silently when a file of the same name already exists.
    ///
    /// # Returns
    /// The path the file was copied to
    pub fn place(
        &self,
        source: &Utf8Path,
        dest_dir: &Utf8Path,
    ) -> Result<Utf8PathBuf, InstallError> {
        let file_name = source
            .file_name()
            .ok_or_else(|| InstallError::InvalidSourcePath(source.to_path_buf()))?;
        let dest = dest_dir.join(file_name);

        fs::copy(source, &dest).map_err(|source| InstallError::CopyFailed {
            path: dest.clone(),
            source,
        })?;

        tracing::info!("Placed {} -> {}", source, dest);
        Ok(dest)
    }

    /// Execute the validate → place → fetch sequence for one request.
    ///
    /// Phase transitions and download progress are published through the
    /// state manager so observers can follow along. A fetch failure leaves
    /// the already-placed file where it is; completed steps are never rolled
    /// back.
    pub fn run(
        &self,
        request: &InstallRequest,
        state: &StateManager,
    ) -> Result<InstallSummary, InstallError> {
        state.set_phase(InstallPhase::Validating, "Checking mod files...");
        let plan = self.plan(request)?;
        state.set_target_root(plan.mods_dir.parent().map(|p| p.to_path_buf()));

        state.set_phase(
            InstallPhase::Placing,
            &format!(
                "Copying {}...",
                request.local_source_path.file_name().unwrap_or("mod jar")
            ),
        );
        let placed_path = self.place(&request.local_source_path, &plan.mods_dir)?;
        state.record_placed_file(placed_path.clone());

        state.set_phase(
            InstallPhase::Fetching,
            &format!("Downloading {}...", request.remote_filename),
        );
        let bytes_downloaded = download::download_to_file(
            &self.agent,
            &request.remote_source_url,
            &plan.remote_dest_path,
            |bytes, total| {
                state.update_download_progress(bytes, total);
            },
        )?;
        state.record_placed_file(plan.remote_dest_path.clone());

        Ok(InstallSummary {
            mods_dir: plan.mods_dir,
            placed_path,
            fetched_path: plan.remote_dest_path,
            bytes_downloaded,
        })
    }
}

impl Default for InstallService {
    fn default() -> Self {
        Self::new()
    }
}

fn ensure_source_file(path: &Utf8Path) -> Result<(), InstallError> {
    if path.is_file() {
        Ok(())
    } else {
        Err(InstallError::InvalidSourcePath(path.to_path_buf()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn utf8(path: std::path::PathBuf) -> Utf8PathBuf {
        Utf8PathBuf::try_from(path).unwrap()
    }

    fn request_with(root: &Utf8Path, jar: &Utf8Path) -> InstallRequest {
        InstallRequest {
            local_source_path: jar.to_path_buf(),
            unlocker_source_path: None,
            remote_source_url: "http://127.0.0.1:1/unused".to_string(),
            remote_filename: "ecu-1.4.0.jar".to_string(),
            target_root: Some(root.to_path_buf()),
        }
    }

    #[test]
    fn test_plan_derives_layout_and_creates_dirs() {
        let temp_dir = TempDir::new().unwrap();
        let root = utf8(temp_dir.path().to_path_buf());
        let jar = root.join("Essential.jar");
        std::fs::write(&jar, b"jar").unwrap();

        let service = InstallService::new();
        let plan = service.plan(&request_with(&root, &jar)).unwrap();

        assert_eq!(plan.mods_dir, root.join("mods"));
        assert_eq!(plan.essential_dir, root.join("essential"));
        assert_eq!(plan.remote_dest_path, root.join("mods/ecu-1.4.0.jar"));
        assert!(plan.mods_dir.is_dir());
        assert!(plan.essential_dir.is_dir());
    }

    #[test]
    fn test_plan_is_idempotent() {
        let temp_dir = TempDir::new().unwrap();
        let root = utf8(temp_dir.path().to_path_buf());
        let jar = root.join("Essential.jar");
        std::fs::write(&jar, b"jar").unwrap();

        let service = InstallService::new();
        let request = request_with(&root, &jar);
        let first = service.plan(&request).unwrap();
        let second = service.plan(&request).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_plan_missing_source_creates_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let root = utf8(temp_dir.path().to_path_buf());
        let jar = root.join("does-not-exist.jar");

        let service = InstallService::new();
        let err = service.plan(&request_with(&root, &jar)).unwrap_err();

        assert!(matches!(err, InstallError::InvalidSourcePath(_)));
        // Validation happens before directory creation
        assert!(!root.join("mods").exists());
        assert!(!root.join("essential").exists());
    }

    #[test]
    fn test_plan_missing_unlocker_source_is_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let root = utf8(temp_dir.path().to_path_buf());
        let jar = root.join("Essential.jar");
        std::fs::write(&jar, b"jar").unwrap();

        let mut request = request_with(&root, &jar);
        request.unlocker_source_path = Some(root.join("missing-unlocker.jar"));

        let service = InstallService::new();
        let err = service.plan(&request).unwrap_err();
        assert!(matches!(err, InstallError::InvalidSourcePath(_)));
    }

    #[test]
    fn test_plan_missing_target_root() {
        let temp_dir = TempDir::new().unwrap();
        let root = utf8(temp_dir.path().to_path_buf());
        let jar = root.join("Essential.jar");
        std::fs::write(&jar, b"jar").unwrap();

        let missing_root = root.join("no-such-dir");
        let err = InstallService::new()
            .plan(&request_with(&missing_root, &jar))
            .unwrap_err();

        assert!(matches!(err, InstallError::PathNotFound(_)));
    }

    #[test]
    fn test_place_copies_keeping_name() {
        let temp_dir = TempDir::new().unwrap();
        let root = utf8(temp_dir.path().to_path_buf());
        let jar = root.join("Essential.jar");
        std::fs::write(&jar, b"payload").unwrap();
        let dest_dir = root.join("mods");
        std::fs::create_dir(&dest_dir).unwrap();

        let placed = InstallService::new().place(&jar, &dest_dir).unwrap();

        assert_eq!(placed, dest_dir.join("Essential.jar"));
        assert_eq!(std::fs::read(&placed).unwrap(), b"payload");
    }

    #[test]
    fn test_place_overwrites_silently() {
        let temp_dir = TempDir::new().unwrap();
        let root = utf8(temp_dir.path().to_path_buf());
        let jar = root.join("Essential.jar");
        std::fs::write(&jar, b"new").unwrap();
        let dest_dir = root.join("mods");
        std::fs::create_dir(&dest_dir).unwrap();
        std::fs::write(dest_dir.join("Essential.jar"), b"old and longer").unwrap();

        let placed = InstallService::new().place(&jar, &dest_dir).unwrap();

        assert_eq!(std::fs::read(&placed).unwrap(), b"new");
    }

    #[test]
    fn test_place_into_missing_dir_fails() {
        let temp_dir = TempDir::new().unwrap();
        let root = utf8(temp_dir.path().to_path_buf());
        let jar = root.join("Essential.jar");
        std::fs::write(&jar, b"payload").unwrap();

        let err = InstallService::new()
            .place(&jar, &root.join("missing"))
            .unwrap_err();
        assert!(matches!(err, InstallError::CopyFailed { .. }));
    }

    #[test]
    fn test_error_messages_are_human_readable() {
        let err = InstallError::InvalidSourcePath(Utf8PathBuf::from("/tmp/x.jar"));
        assert_eq!(
            err.to_string(),
            "source file does not exist or is not a file: /tmp/x.jar"
        );

        let err = InstallError::UserDeclined;
        assert!(err.to_string().contains("no install directory"));
    }

    #[test]
    fn test_outcome_from_result() {
        let failure = InstallOutcome::from_result(Err(InstallError::UserDeclined));
        assert!(!failure.is_success());
        match failure {
            InstallOutcome::Failure { reason } => {
                assert!(reason.contains("cancelled"));
            }
            InstallOutcome::Success(_) => panic!("expected failure"),
        }
    }
}
