use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Failures surfaced to whoever triggered the operation. Nothing in here is
/// retried; the caller reports and moves on.
#[derive(Debug, thiserror::Error)]
pub enum VaultError {
    #[error("save directory not found: {}", .0.display())]
    DirectoryNotFound(PathBuf),

    #[error("can't find save file for slot {0}")]
    SaveNotFound(u32),

    #[error(transparent)]
    Io(#[from] io::Error),
}

impl VaultError {
    /// True for errors the UI recovers from by rescanning the slot catalog.
    pub fn needs_rescan(&self) -> bool {
        matches!(
            self,
            VaultError::DirectoryNotFound(_) | VaultError::SaveNotFound(_)
        )
    }
}

/// `read_dir` with a missing directory mapped to `DirectoryNotFound`.
pub(crate) fn read_dir_checked(path: &Path) -> Result<fs::ReadDir, VaultError> {
    fs::read_dir(path).map_err(|e| {
        if e.kind() == io::ErrorKind::NotFound {
            VaultError::DirectoryNotFound(path.to_path_buf())
        } else {
            VaultError::Io(e)
        }
    })
}
