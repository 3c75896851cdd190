/// Path validation for cleanup candidates
///
/// A path is safe to hand to the cleanup engine only if it is a well-formed,
/// non-empty, existing regular file under the scratch root. Validation is
/// pure: no filesystem state is changed, and the returned path is canonical.
use crate::config::types::{CleanupError, Result};
use std::os::unix::ffi::OsStrExt;
use std::path::{Path, PathBuf};

/// Validate `candidate` as a deletable scratch file.
///
/// Checks, in order:
/// 1. no interior NUL bytes (the value could never reach a syscall)
/// 2. non-empty
/// 3. exists (canonicalization resolves symlinks and `..`)
/// 4. is a regular file, not a directory or other entry
/// 5. is a descendant of [`crate::scratch::root`]
///
/// On success returns the canonicalized path.
pub fn validate(candidate: &Path) -> Result<PathBuf> {
    let result = check(candidate);
    if result.is_err() {
        crate::observability::stats::global().validation_failures.inc();
    }
    result
}

fn check(candidate: &Path) -> Result<PathBuf> {
    let bytes = candidate.as_os_str().as_bytes();
    if bytes.contains(&0) {
        return Err(CleanupError::TypeMismatch(format!(
            "path contains NUL byte: {:?}",
            candidate
        )));
    }
    if bytes.is_empty() {
        return Err(CleanupError::EmptyPath);
    }

    let canonical = candidate.canonicalize().map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            CleanupError::NotFound(candidate.to_path_buf())
        } else {
            CleanupError::OsFailure {
                path: candidate.to_path_buf(),
                source: e,
            }
        }
    })?;

    if !canonical.is_file() {
        return Err(CleanupError::NotAFile(canonical));
    }

    if !canonical.starts_with(crate::scratch::root()) {
        return Err(CleanupError::OutsideScratchRoot(canonical));
    }

    Ok(canonical)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scratch::mkstemp::mkstemp;
    use std::fs;

    #[test]
    fn test_validate_nul_byte_rejected() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let path = Path::new(OsStr::from_bytes(b"/tmp/scratch\0guard.tmp"));
        let err = validate(path).unwrap_err();
        assert!(matches!(err, CleanupError::TypeMismatch(_)));
    }

    #[test]
    fn test_validate_empty_path() {
        let err = validate(Path::new("")).unwrap_err();
        assert!(matches!(err, CleanupError::EmptyPath));
    }

    #[test]
    fn test_validate_nonexistent() {
        let err = validate(Path::new("/tmp/scratchguard_does_not_exist.tmp")).unwrap_err();
        assert!(matches!(err, CleanupError::NotFound(_)));
    }

    #[test]
    fn test_validate_directory_rejected() {
        let dir = std::env::temp_dir().join("scratchguard_test_validate_dir");
        fs::create_dir_all(&dir).unwrap();

        let err = validate(&dir).unwrap_err();
        assert!(matches!(err, CleanupError::NotAFile(_)));

        let _ = fs::remove_dir(&dir);
    }

    #[test]
    fn test_validate_outside_scratch_root() {
        // /proc/self/status exists and is a regular-ish file outside any tmpdir
        let err = validate(Path::new("/proc/self/status")).unwrap_err();
        assert!(matches!(err, CleanupError::OutsideScratchRoot(_)));
    }

    #[test]
    fn test_validate_ok_returns_canonical() {
        let (_file, path) = mkstemp("validate_", ".tmp").unwrap();

        let validated = validate(&path).unwrap();
        assert!(validated.is_absolute());
        assert!(validated.starts_with(crate::scratch::root()));
        // mkstemp already produced a canonical path, identity is preserved
        assert_eq!(validated, path.canonicalize().unwrap());

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_validate_has_no_side_effects() {
        let (_file, path) = mkstemp("validate_", ".tmp").unwrap();

        let _ = validate(&path).unwrap();
        assert!(path.exists(), "validation must not touch the file");

        let _ = fs::remove_file(&path);
    }
}
