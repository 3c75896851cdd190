/// Core types and error taxonomy for scratchguard
use std::path::PathBuf;
use thiserror::Error;

/// Errors reported by validation and deletion.
///
/// Construction-time validation surfaces these as `Err`; teardown paths
/// (Drop, registry drain) swallow them and log instead, because raising
/// during an in-progress shutdown sequence would destabilize it.
#[derive(Error, Debug)]
pub enum CleanupError {
    #[error("path is not a usable path value: {0}")]
    TypeMismatch(String),

    #[error("path cannot be empty")]
    EmptyPath,

    #[error("path does not exist: {}", .0.display())]
    NotFound(PathBuf),

    #[error("path is not a regular file: {}", .0.display())]
    NotAFile(PathBuf),

    #[error("path is not under the scratch directory: {}", .0.display())]
    OutsideScratchRoot(PathBuf),

    #[error("path is a directory, refusing to remove: {}", .0.display())]
    IsADirectory(PathBuf),

    #[error("permission denied removing {}", .0.display())]
    PermissionDenied(PathBuf),

    #[error("remove failed for {}: {source}", .path.display())]
    OsFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, CleanupError>;

impl CleanupError {
    /// True for errors produced by path validation rather than removal.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            CleanupError::TypeMismatch(_)
                | CleanupError::EmptyPath
                | CleanupError::NotFound(_)
                | CleanupError::NotAFile(_)
                | CleanupError::OutsideScratchRoot(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_classification() {
        assert!(CleanupError::EmptyPath.is_validation());
        assert!(CleanupError::OutsideScratchRoot(PathBuf::from("/etc/passwd")).is_validation());
        assert!(!CleanupError::IsADirectory(PathBuf::from("/tmp")).is_validation());
        assert!(!CleanupError::Config("bad settings".into()).is_validation());
    }

    #[test]
    fn test_error_display_includes_path() {
        let err = CleanupError::NotFound(PathBuf::from("/tmp/gone.tmp"));
        assert!(err.to_string().contains("/tmp/gone.tmp"));
    }
}
