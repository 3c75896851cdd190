/// Lifetime-bound cleanup handles
///
/// A handle owns exactly one validated scratch path and guarantees its
/// removal at most once, no matter which teardown path reaches it first:
/// an explicit `cleanup()` call, the owner's scope ending, or the deferred
/// registry draining at process exit.
///
/// Two interchangeable strategies share the validation logic:
/// - [`ImmediateHandle`]: removal bound to `Drop`, guarded by an explicit
///   cleaned flag.
/// - [`DeferredHandle`]: removal delegated to a one-shot [`FinalizeCell`],
///   which enforces single-fire on its own.
use crate::config::types::Result;
use crate::safety::{deleter, registry, validate};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// One-shot deletion trigger shared between a handle and the registry.
///
/// The first caller of [`fire`](Self::fire) performs the deletion; everyone
/// after gets `Ok(())`. The atomic swap is what keeps the at-most-once
/// invariant when a scope drop and the shutdown drain race.
#[derive(Debug)]
pub(crate) struct FinalizeCell {
    path: PathBuf,
    fired: AtomicBool,
}

impl FinalizeCell {
    pub(crate) fn new(path: PathBuf) -> Self {
        Self {
            path,
            fired: AtomicBool::new(false),
        }
    }

    pub(crate) fn path(&self) -> &Path {
        &self.path
    }

    /// Trigger the deletion. First caller wins; later calls are no-ops.
    pub(crate) fn fire(&self) -> Result<()> {
        if self.fired.swap(true, Ordering::AcqRel) {
            return Ok(());
        }
        deleter::delete(&self.path)
    }

    /// Teardown-context trigger: outcome is logged, never returned.
    /// Reports whether this call performed the deletion attempt.
    pub(crate) fn fire_quiet(&self) -> bool {
        if self.fired.swap(true, Ordering::AcqRel) {
            return false;
        }
        deleter::delete_quiet(&self.path);
        true
    }

    #[cfg(test)]
    pub(crate) fn has_fired(&self) -> bool {
        self.fired.load(Ordering::Acquire)
    }
}

/// Common surface of the two cleanup strategies.
pub trait CleanupHandle: Send + Sync {
    /// Idempotent explicit cleanup. The first call performs (or routes to)
    /// the deletion and returns its outcome; later calls return `Ok(())`.
    fn cleanup(&self) -> Result<()>;

    /// The validated, canonical path this handle owns.
    fn path(&self) -> &Path;
}

/// How a handle's deletion is bound to a lifetime.
#[derive(Debug)]
enum Binding {
    /// Deletion on scope exit, guarded by a cleaned flag.
    Scope(AtomicBool),
    /// Deletion deferred to the registry drain at process exit.
    ProcessExit(Arc<FinalizeCell>),
}

/// Destructor-bound handle: removal happens when the handle drops.
///
/// Construction validates the path; if validation fails no handle exists,
/// so no drop glue can ever touch a partially built path.
#[derive(Debug)]
pub struct ImmediateHandle {
    path: PathBuf,
    binding: Binding,
}

impl ImmediateHandle {
    /// Validate `path` and bind its removal to this handle's lifetime.
    ///
    /// With `delay_till_exit` the removal is instead enrolled in the
    /// process-wide deferred registry and happens at shutdown; dropping the
    /// handle earlier does nothing.
    pub fn new(path: &Path, delay_till_exit: bool) -> Result<Self> {
        if delay_till_exit {
            crate::safety::shutdown::install();
            Self::enrolled_in(path, registry::global())
        } else {
            let validated = validate::validate(path)?;
            Ok(Self {
                path: validated,
                binding: Binding::Scope(AtomicBool::new(false)),
            })
        }
    }

    /// Deferred construction against an explicit registry.
    pub fn enrolled_in(path: &Path, registry: &registry::DeferredRegistry) -> Result<Self> {
        let validated = validate::validate(path)?;
        let cell = Arc::new(FinalizeCell::new(validated.clone()));
        registry.enroll(Arc::clone(&cell));
        Ok(Self {
            path: validated,
            binding: Binding::ProcessExit(cell),
        })
    }
}

impl CleanupHandle for ImmediateHandle {
    fn cleanup(&self) -> Result<()> {
        match &self.binding {
            Binding::Scope(cleaned) => {
                if cleaned.swap(true, Ordering::AcqRel) {
                    return Ok(());
                }
                deleter::delete(&self.path)
            }
            Binding::ProcessExit(cell) => cell.fire(),
        }
    }

    fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for ImmediateHandle {
    fn drop(&mut self) {
        match &self.binding {
            Binding::Scope(cleaned) => {
                if !cleaned.swap(true, Ordering::AcqRel) {
                    deleter::delete_quiet(&self.path);
                }
            }
            // Timing override: the registry owns the deletion now. The cell
            // outlives this handle through the registry's Arc clone.
            Binding::ProcessExit(_) => {}
        }
    }
}

/// Finalizer-bound handle: all state lives in a shared one-shot cell.
///
/// No separate cleaned flag is needed; the cell enforces single-fire even
/// when multiple teardown paths reach it.
#[derive(Debug)]
pub struct DeferredHandle {
    cell: Arc<FinalizeCell>,
    delay_till_exit: bool,
}

impl DeferredHandle {
    /// Validate `path` and attach a one-shot finalizer to it.
    pub fn new(path: &Path, delay_till_exit: bool) -> Result<Self> {
        if delay_till_exit {
            crate::safety::shutdown::install();
            Self::enrolled_in(path, registry::global())
        } else {
            let validated = validate::validate(path)?;
            Ok(Self {
                cell: Arc::new(FinalizeCell::new(validated)),
                delay_till_exit: false,
            })
        }
    }

    /// Deferred construction against an explicit registry.
    pub fn enrolled_in(path: &Path, registry: &registry::DeferredRegistry) -> Result<Self> {
        let validated = validate::validate(path)?;
        let cell = Arc::new(FinalizeCell::new(validated));
        registry.enroll(Arc::clone(&cell));
        Ok(Self {
            cell,
            delay_till_exit: true,
        })
    }
}

impl CleanupHandle for DeferredHandle {
    fn cleanup(&self) -> Result<()> {
        self.cell.fire()
    }

    fn path(&self) -> &Path {
        self.cell.path()
    }
}

impl Drop for DeferredHandle {
    fn drop(&mut self) {
        if !self.delay_till_exit {
            self.cell.fire_quiet();
        }
    }
}
