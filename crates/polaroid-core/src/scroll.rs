//! Page-scroll suspension shared by every overlay.
//!
//! Suspending scroll is process-wide state. It can only be taken through a
//! [`ScrollGuard`], which restores scroll when dropped, so every exit path
//! (explicit close, early return, panic unwind, teardown) releases it.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, OnceLock};

use tracing::debug;

/// Counts active suspensions. Scroll is suspended while the count is non-zero.
#[derive(Debug, Default)]
pub struct ScrollContext {
    holders: AtomicUsize,
}

static GLOBAL: OnceLock<Arc<ScrollContext>> = OnceLock::new();

impl ScrollContext {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// The context shared by the whole process.
    pub fn global() -> Arc<Self> {
        Arc::clone(GLOBAL.get_or_init(ScrollContext::new))
    }

    /// Suspend scroll until the returned guard is dropped.
    pub fn acquire(self: &Arc<Self>) -> ScrollGuard {
        let previous = self.holders.fetch_add(1, Ordering::AcqRel);
        if previous == 0 {
            debug!("Page scroll suspended");
        }
        ScrollGuard {
            context: Arc::clone(self),
        }
    }

    pub fn is_suspended(&self) -> bool {
        self.holders.load(Ordering::Acquire) > 0
    }

    pub fn holders(&self) -> usize {
        self.holders.load(Ordering::Acquire)
    }

    fn release(&self) {
        let previous = self.holders.fetch_sub(1, Ordering::AcqRel);
        if previous == 1 {
            debug!("Page scroll restored");
        }
    }
}

/// Proof of one scroll suspension. Not cloneable: one acquire, one release.
#[derive(Debug)]
pub struct ScrollGuard {
    context: Arc<ScrollContext>,
}

impl Drop for ScrollGuard {
    fn drop(&mut self) {
        self.context.release();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guard_restores_on_drop() {
        let ctx = ScrollContext::new();
        assert!(!ctx.is_suspended());
        let guard = ctx.acquire();
        assert!(ctx.is_suspended());
        drop(guard);
        assert!(!ctx.is_suspended());
    }

    #[test]
    fn test_nested_guards_are_counted() {
        let ctx = ScrollContext::new();
        let a = ctx.acquire();
        let b = ctx.acquire();
        assert_eq!(ctx.holders(), 2);
        drop(a);
        assert!(ctx.is_suspended());
        drop(b);
        assert!(!ctx.is_suspended());
    }

    #[test]
    fn test_guard_released_on_unwind() {
        let ctx = ScrollContext::new();
        let inner = Arc::clone(&ctx);
        let result = std::panic::catch_unwind(move || {
            let _guard = inner.acquire();
            panic!("overlay crashed");
        });
        assert!(result.is_err());
        assert!(!ctx.is_suspended());
    }
}
