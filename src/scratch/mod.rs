//! Scratch directory
//!
//! The scratch root is the safety boundary for every deletion: validation and
//! removal both refuse paths that are not descendants of it. It is resolved
//! once per process, defaulting to the platform temporary directory.

pub mod mkstemp;

use crate::config::types::{CleanupError, Result};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

static SCRATCH_ROOT: OnceLock<PathBuf> = OnceLock::new();

/// The scratch directory root for this process.
///
/// Resolved on first use from [`init_root`] if it ran earlier, otherwise from
/// `std::env::temp_dir()`. Canonicalized so descendant checks agree with the
/// canonical paths the validator produces (e.g. `/tmp` vs `/private/tmp`).
pub fn root() -> &'static Path {
    SCRATCH_ROOT.get_or_init(|| {
        let tmp = std::env::temp_dir();
        tmp.canonicalize().unwrap_or(tmp)
    })
}

/// Install a scratch root override before first use.
///
/// Fails with `Config` if the root was already resolved or the path is not an
/// existing directory.
pub fn init_root(path: &Path) -> Result<()> {
    let canonical = path.canonicalize().map_err(|e| {
        CleanupError::Config(format!(
            "scratch root {} is not usable: {}",
            path.display(),
            e
        ))
    })?;

    if !canonical.is_dir() {
        return Err(CleanupError::Config(format!(
            "scratch root is not a directory: {}",
            canonical.display()
        )));
    }

    SCRATCH_ROOT.set(canonical).map_err(|rejected| {
        CleanupError::Config(format!(
            "scratch root already resolved, cannot install {}",
            rejected.display()
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_is_absolute_dir() {
        let root = root();
        assert!(root.is_absolute());
        assert!(root.is_dir());
    }

    #[test]
    fn test_init_root_after_resolution_fails() {
        let _ = root(); // force resolution
        let err = init_root(&std::env::temp_dir()).unwrap_err();
        assert!(matches!(err, CleanupError::Config(_)));
    }

    #[test]
    fn test_init_root_rejects_missing_dir() {
        let err = init_root(Path::new("/tmp/scratchguard_no_such_root")).unwrap_err();
        assert!(matches!(err, CleanupError::Config(_)));
    }
}
