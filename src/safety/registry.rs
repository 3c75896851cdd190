/// Process-wide registry of deferred cleanups
///
/// Handles constructed with `delay_till_exit` park their one-shot deletion
/// cells here. The registry drains exactly once, normally from the atexit
/// hook, removing every enrolled file in insertion order.
use crate::safety::handle::FinalizeCell;
use log::{debug, info};
use once_cell::sync::Lazy;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

/// Ordered collection of deferred cleanup cells.
///
/// Enroll and drain are mutex-guarded: the global instance is shared across
/// threads, and the at-most-once drain must hold under concurrent access.
pub struct DeferredRegistry {
    entries: Mutex<Vec<Arc<FinalizeCell>>>,
    drained: AtomicBool,
}

impl DeferredRegistry {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(Vec::new()),
            drained: AtomicBool::new(false),
        }
    }

    /// Append a cell. Insertion order is preserved for the drain.
    ///
    /// Enrollment after the drain has run is accepted but will never be
    /// flushed by this registry; callers holding such cells still get
    /// scope-exit or explicit cleanup through the handle itself.
    pub(crate) fn enroll(&self, cell: Arc<FinalizeCell>) {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        debug!(
            "deferring cleanup of {} until process exit",
            cell.path().display()
        );
        entries.push(cell);
    }

    /// Drain the registry: fire every enrolled cell in insertion order.
    ///
    /// Exactly-once: the first call processes a snapshot of the entries and
    /// clears them; later calls are no-ops returning 0 regardless of
    /// contents. Individual failures are logged, never propagated, so this
    /// is safe to run from an atexit callback.
    ///
    /// Returns the number of deletion attempts performed.
    pub fn drain(&self) -> usize {
        if self.drained.swap(true, Ordering::AcqRel) {
            return 0;
        }

        let cells = {
            let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
            std::mem::take(&mut *entries)
        };

        let mut attempts = 0;
        for cell in &cells {
            if cell.fire_quiet() {
                attempts += 1;
            }
        }

        crate::observability::stats::global().drains.inc();
        if !cells.is_empty() {
            info!(
                "drained deferred registry: {} attempts across {} entries",
                attempts,
                cells.len()
            );
        }
        attempts
    }

    pub fn len(&self) -> usize {
        self.entries.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for DeferredRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// The process-wide registry used by `delay_till_exit` construction.
static GLOBAL_REGISTRY: Lazy<DeferredRegistry> = Lazy::new(DeferredRegistry::new);

pub fn global() -> &'static DeferredRegistry {
    &GLOBAL_REGISTRY
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scratch::mkstemp::mkstemp;
    use std::path::PathBuf;

    fn cell_for(path: PathBuf) -> Arc<FinalizeCell> {
        Arc::new(FinalizeCell::new(path))
    }

    #[test]
    fn test_drain_removes_in_insertion_order() {
        let registry = DeferredRegistry::new();
        let (_f1, p1) = mkstemp("registry_", ".tmp").unwrap();
        let (_f2, p2) = mkstemp("registry_", ".tmp").unwrap();

        registry.enroll(cell_for(p1.clone()));
        registry.enroll(cell_for(p2.clone()));
        assert_eq!(registry.len(), 2);

        let attempts = registry.drain();
        assert_eq!(attempts, 2);
        assert!(!p1.exists());
        assert!(!p2.exists());
        assert!(registry.is_empty());
    }

    #[test]
    fn test_second_drain_is_noop() {
        let registry = DeferredRegistry::new();
        let (_f, p) = mkstemp("registry_", ".tmp").unwrap();
        registry.enroll(cell_for(p.clone()));

        assert_eq!(registry.drain(), 1);
        assert_eq!(registry.drain(), 0);

        // even with fresh contents, a drained registry stays inert
        let (_f2, p2) = mkstemp("registry_", ".tmp").unwrap();
        registry.enroll(cell_for(p2.clone()));
        assert_eq!(registry.drain(), 0);
        assert!(p2.exists());

        let _ = std::fs::remove_file(&p2);
    }

    #[test]
    fn test_drain_survives_individual_failures() {
        let registry = DeferredRegistry::new();
        let (_f, good) = mkstemp("registry_", ".tmp").unwrap();

        // missing file: the cell fires, the deletion fails, the drain goes on
        registry.enroll(cell_for(crate::scratch::root().join("registry_missing.tmp")));
        registry.enroll(cell_for(good.clone()));

        let attempts = registry.drain();
        assert_eq!(attempts, 2);
        assert!(!good.exists());
    }

    #[test]
    fn test_already_fired_cells_skipped() {
        let registry = DeferredRegistry::new();
        let (_f, p) = mkstemp("registry_", ".tmp").unwrap();

        let cell = cell_for(p.clone());
        registry.enroll(Arc::clone(&cell));
        cell.fire().unwrap();
        assert!(cell.has_fired());

        assert_eq!(registry.drain(), 0);
        assert!(!p.exists());
    }

    #[test]
    fn test_empty_drain() {
        let registry = DeferredRegistry::new();
        assert_eq!(registry.drain(), 0);
    }

    #[test]
    fn test_concurrent_drain_single_winner() {
        let registry = Arc::new(DeferredRegistry::new());
        let (_f, p) = mkstemp("registry_", ".tmp").unwrap();
        registry.enroll(cell_for(p.clone()));

        let mut joins = Vec::new();
        for _ in 0..8 {
            let r = Arc::clone(&registry);
            joins.push(std::thread::spawn(move || r.drain()));
        }
        let total: usize = joins.into_iter().map(|j| j.join().unwrap()).sum();
        assert_eq!(total, 1, "exactly one drain performs the attempt");
        assert!(!p.exists());
    }
}
