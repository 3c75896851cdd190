/// Panic-free file removal
///
/// Every failure mode is a returned value. This function runs inside Drop
/// impls and the atexit-triggered registry drain, where a panic would abort
/// an in-progress teardown sequence.
use crate::config::types::{CleanupError, Result};
use log::{debug, warn};
use std::fs;
use std::os::unix::ffi::OsStrExt;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};

/// When set, teardown-time failures log at debug instead of warn.
/// Controlled by `Settings::apply`.
static QUIET_TEARDOWN: AtomicBool = AtomicBool::new(false);

pub(crate) fn set_quiet_teardown(quiet: bool) {
    QUIET_TEARDOWN.store(quiet, Ordering::Relaxed);
}

/// Remove a single scratch file.
///
/// Preconditions are re-checked defensively, so this is safe to call without
/// going through the validator first: NUL bytes, empty paths, and paths
/// outside the scratch root are rejected before any syscall.
///
/// The root check here is lexical (`starts_with` on the path as given);
/// symlinks and `..` components are not resolved. Callers that need
/// resolution must run the path through [`crate::safety::validate`] first,
/// which canonicalizes before the boundary check.
pub fn delete(path: &Path) -> Result<()> {
    let bytes = path.as_os_str().as_bytes();
    if bytes.contains(&0) {
        return Err(CleanupError::TypeMismatch(format!(
            "path contains NUL byte: {:?}",
            path
        )));
    }
    if bytes.is_empty() {
        return Err(CleanupError::EmptyPath);
    }
    if !path.starts_with(crate::scratch::root()) {
        return Err(CleanupError::OutsideScratchRoot(path.to_path_buf()));
    }

    match fs::remove_file(path) {
        Ok(()) => {
            debug!("removed scratch file {}", path.display());
            crate::observability::stats::global().removals.inc();
            Ok(())
        }
        Err(e) => {
            crate::observability::stats::global().removal_failures.inc();
            Err(classify_remove_error(path, e))
        }
    }
}

/// Map an io error from `remove_file` onto the deletion taxonomy.
fn classify_remove_error(path: &Path, e: std::io::Error) -> CleanupError {
    match e.kind() {
        std::io::ErrorKind::NotFound => CleanupError::NotFound(path.to_path_buf()),
        std::io::ErrorKind::PermissionDenied => {
            // unlink(2) on a directory reports EISDIR or EPERM depending on
            // the platform; tell the two apart with a metadata probe
            if path.is_dir() {
                CleanupError::IsADirectory(path.to_path_buf())
            } else {
                CleanupError::PermissionDenied(path.to_path_buf())
            }
        }
        _ => {
            if e.raw_os_error() == Some(libc::EISDIR) || path.is_dir() {
                CleanupError::IsADirectory(path.to_path_buf())
            } else {
                CleanupError::OsFailure {
                    path: path.to_path_buf(),
                    source: e,
                }
            }
        }
    }
}

/// Best-effort removal that never reports failure.
///
/// Suitable as a finalizer target: any error is suppressed after logging.
/// Deliberately returns nothing.
pub fn safe_remove<P: AsRef<Path>>(path: P) {
    if let Err(e) = delete(path.as_ref()) {
        debug!("safe_remove suppressed: {}", e);
    }
}

/// Teardown-context removal: delete and log the outcome instead of
/// returning it. Used by Drop impls and the registry drain.
pub(crate) fn delete_quiet(path: &Path) {
    if let Err(e) = delete(path) {
        if QUIET_TEARDOWN.load(Ordering::Relaxed) {
            debug!("teardown removal failed: {}", e);
        } else {
            warn!("teardown removal failed: {}", e);
        }
    }
}
