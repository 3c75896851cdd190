/// Runtime settings for scratchguard
///
/// Settings are optional: the library works with defaults resolved from the
/// platform temporary directory. A JSON settings file lets a host override
/// the scratch root and tune teardown logging.
use crate::config::types::{CleanupError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Process-level settings, loadable from a JSON file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Override for the scratch directory root. When absent the platform
    /// temporary directory is used.
    pub scratch_root: Option<PathBuf>,

    /// When false, deletion failures during Drop or registry drain are logged
    /// at debug level instead of warn.
    pub log_teardown_errors: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            scratch_root: None,
            log_teardown_errors: true,
        }
    }
}

impl Settings {
    /// Load settings from a JSON file, or defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(p) => p,
            None => return Ok(Self::default()),
        };

        let raw = fs::read_to_string(path).map_err(|e| {
            CleanupError::Config(format!("failed to read settings {}: {}", path.display(), e))
        })?;

        serde_json::from_str(&raw).map_err(|e| {
            CleanupError::Config(format!(
                "failed to parse settings {}: {}",
                path.display(),
                e
            ))
        })
    }

    /// Apply the settings to process-wide state. Must run before any handle
    /// is constructed; a scratch root installed after first use is rejected.
    pub fn apply(&self) -> Result<()> {
        if let Some(root) = &self.scratch_root {
            crate::scratch::init_root(root)?;
        }
        crate::safety::deleter::set_quiet_teardown(!self.log_teardown_errors);
        Ok(())
    }
}
