/// Unique temp-file creation under the scratch root
///
/// Thin wrapper over the platform's `mkstemps`, returning an owned `File`
/// plus the path the kernel chose. The cleanup engine only ever consumes the
/// returned path; callers keep the descriptor.
use crate::config::types::{CleanupError, Result};
use std::ffi::OsStr;
use std::fs::File;
use std::io::Write;
use std::os::unix::ffi::OsStrExt;
use std::os::unix::io::FromRawFd;
use std::path::PathBuf;

/// Default template parts, matching the shipped file-naming convention.
pub const DEFAULT_PREFIX: &str = "scratch_";
pub const DEFAULT_SUFFIX: &str = ".tmp";

/// Create a unique file under the scratch root as `{prefix}XXXXXX{suffix}`.
pub fn mkstemp(prefix: &str, suffix: &str) -> Result<(File, PathBuf)> {
    if prefix.as_bytes().contains(&0) || suffix.as_bytes().contains(&0) {
        return Err(CleanupError::TypeMismatch(
            "prefix/suffix cannot contain NUL bytes".to_string(),
        ));
    }

    let mut template = crate::scratch::root().as_os_str().as_bytes().to_vec();
    template.push(b'/');
    template.extend_from_slice(prefix.as_bytes());
    template.extend_from_slice(b"XXXXXX");
    template.extend_from_slice(suffix.as_bytes());
    template.push(0);

    let fd = unsafe {
        libc::mkstemps(
            template.as_mut_ptr() as *mut libc::c_char,
            suffix.len() as libc::c_int,
        )
    };
    if fd < 0 {
        let err = std::io::Error::last_os_error();
        template.pop(); // drop the NUL for display
        return Err(CleanupError::OsFailure {
            path: PathBuf::from(OsStr::from_bytes(&template)),
            source: err,
        });
    }

    template.pop(); // mkstemps filled the Xs in place; drop the trailing NUL
    let path = PathBuf::from(OsStr::from_bytes(&template));
    let file = unsafe { File::from_raw_fd(fd) };
    Ok((file, path))
}

/// Create a unique temp file with the default prefix/suffix.
pub fn mkstemp_default() -> Result<(File, PathBuf)> {
    mkstemp(DEFAULT_PREFIX, DEFAULT_SUFFIX)
}

/// Create a unique temp file and write `content` to it.
pub fn write_tempfile(content: &[u8]) -> Result<(File, PathBuf)> {
    let (mut file, path) = mkstemp_default()?;
    file.write_all(content).map_err(|e| CleanupError::OsFailure {
        path: path.clone(),
        source: e,
    })?;
    Ok((file, path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mkstemp_creates_file_under_root() {
        let (_file, path) = mkstemp_default().unwrap();
        assert!(path.exists());
        assert!(path.starts_with(crate::scratch::root()));

        let name = path.file_name().unwrap().to_str().unwrap();
        assert!(name.starts_with(DEFAULT_PREFIX));
        assert!(name.ends_with(DEFAULT_SUFFIX));

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_mkstemp_custom_prefix_suffix() {
        let (_file, path) = mkstemp("guard_", ".bin").unwrap();
        let name = path.file_name().unwrap().to_str().unwrap();
        assert!(name.starts_with("guard_"));
        assert!(name.ends_with(".bin"));

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_mkstemp_unique_names() {
        let (_f1, p1) = mkstemp_default().unwrap();
        let (_f2, p2) = mkstemp_default().unwrap();
        assert_ne!(p1, p2);

        let _ = std::fs::remove_file(&p1);
        let _ = std::fs::remove_file(&p2);
    }

    #[test]
    fn test_mkstemp_rejects_nul() {
        let err = mkstemp("bad\0prefix", ".tmp").unwrap_err();
        assert!(matches!(err, CleanupError::TypeMismatch(_)));
    }

    #[test]
    fn test_write_tempfile_content() {
        let (_file, path) = write_tempfile(b"hello scratch").unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"hello scratch");

        let _ = std::fs::remove_file(&path);
    }
}
