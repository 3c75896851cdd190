/// Process-exit hook for the deferred registry
///
/// `libc::atexit` gives the ordering contract the deferred guarantee needs:
/// handlers run LIFO during normal process exit, before the runtime tears
/// down loaded state, and `Lazy` statics are never destructed, so the
/// registry is still alive when the callback fires. Forced termination
/// (SIGKILL, `_exit`) skips atexit entirely; deferred entries are
/// best-effort in that case.
use log::{debug, warn};
use std::sync::Once;

static INSTALL: Once = Once::new();

/// Register the registry drain as an exit callback, exactly once.
///
/// Called by the first `delay_till_exit` enrollment; safe and cheap to call
/// repeatedly.
pub fn install() {
    INSTALL.call_once(|| {
        let rc = unsafe { libc::atexit(drain_at_exit) };
        if rc != 0 {
            // atexit slots exhausted; deferred cleanup degrades to explicit
            warn!("failed to register exit hook (atexit returned {})", rc);
        } else {
            debug!("registered deferred-cleanup exit hook");
        }
    });
}

/// Drain the global registry immediately.
///
/// For hosts that bypass normal exit (custom shutdown sequences, test
/// harnesses). Idempotent like the drain itself.
pub fn drain_now() -> usize {
    crate::safety::registry::global().drain()
}

extern "C" fn drain_at_exit() {
    // Runs during process teardown: the drain swallows all errors and the
    // registry lock recovers from poisoning, so nothing here can unwind.
    crate::safety::registry::global().drain();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_install_is_idempotent() {
        install();
        install();
        install();
    }
}
