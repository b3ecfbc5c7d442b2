//! Shared fatal-error flag.
//!
//! Replaces the module-level `EXCEPTION_RAISED` flag the system this crate is
//! modeled on uses: every worker loop polls this at the top of each iteration,
//! and any worker that hits an unrecoverable error sets it before stopping
//! itself. The first observer among the supervising loops initiates shutdown.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Cheaply cloneable handle to a shared fatal-error flag.
#[derive(Clone, Default)]
pub struct FatalFlag(Arc<AtomicBool>);

impl FatalFlag {
    #[must_use]
    pub fn new() -> Self {
        Self(Arc::new(AtomicBool::new(false)))
    }

    /// Marks the system as having hit an unrecoverable error.
    pub fn raise(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    #[must_use]
    pub fn is_raised(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Cooperative stop signal, polled by every worker loop on each wake.
#[derive(Clone, Default)]
pub struct StopFlag(Arc<AtomicBool>);

impl StopFlag {
    #[must_use]
    pub fn new() -> Self {
        Self(Arc::new(AtomicBool::new(false)))
    }

    pub fn stop(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    #[must_use]
    pub fn is_stopped(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fatal_flag_starts_clear() {
        let flag = FatalFlag::new();
        assert!(!flag.is_raised());
        flag.raise();
        assert!(flag.is_raised());
    }

    #[test]
    fn stop_flag_shares_state_across_clones() {
        let a = StopFlag::new();
        let b = a.clone();
        b.stop();
        assert!(a.is_stopped());
    }
}
