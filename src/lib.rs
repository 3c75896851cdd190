//! scratchguard: exactly-once cleanup of temporary files, bound to object
//! lifetime or deferred to process exit.
//!
//! A process that allocates scratch files must not leak them, no matter how
//! control flow leaves the owning scope. scratchguard binds each file's
//! removal to a handle and guarantees at most one deletion attempt per
//! handle, whichever teardown path gets there first.
//!
//! # Architecture
//!
//! ## Cleanup engine ([`safety`])
//! - [`safety::validate`]: candidate paths must be existing regular files
//!   under the scratch root; validation is pure and returns canonical paths
//! - [`safety::deleter`]: panic-free removal, every failure a returned value
//! - [`safety::handle`]: [`ImmediateHandle`] (Drop-bound) and
//!   [`DeferredHandle`] (finalizer-bound), both idempotent
//! - [`safety::registry`]: process-wide ordered registry of deferred
//!   cleanups, drained exactly once
//! - [`safety::shutdown`]: atexit-backed hook that triggers the drain
//!
//! ## Scratch directory ([`scratch`])
//! - [`scratch::root`]: the per-process safety boundary for deletions
//! - [`scratch::mkstemp`]: unique file creation under the root
//!
//! ## Configuration & observability
//! - [`config::types`]: error taxonomy; construction fails loudly, explicit
//!   cleanup returns errors as values, teardown swallows and logs
//! - [`config::settings`]: optional JSON settings (root override, log level
//!   for teardown failures)
//! - [`observability::stats`]: removal outcome counters
//!
//! # Example
//!
//! ```no_run
//! use scratchguard::{ImmediateHandle, CleanupHandle};
//! use scratchguard::scratch::mkstemp::write_tempfile;
//!
//! # fn main() -> scratchguard::Result<()> {
//! let (_file, path) = write_tempfile(b"intermediate results")?;
//! {
//!     let _guard = ImmediateHandle::new(&path, false)?;
//!     // use the file...
//! } // removed here, even without an explicit cleanup() call
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod observability;
pub mod safety;
pub mod scratch;

pub use config::settings::Settings;
pub use config::types::{CleanupError, Result};
pub use safety::deleter::safe_remove;
pub use safety::handle::{CleanupHandle, DeferredHandle, ImmediateHandle};
pub use safety::registry::{global as deferred_registry, DeferredRegistry};
pub use safety::shutdown::drain_now;
pub use scratch::mkstemp::{mkstemp, write_tempfile};
