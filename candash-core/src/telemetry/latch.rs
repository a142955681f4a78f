//! "Have we heard from the bridge yet" flag

use portable_atomic::{AtomicBool, Ordering};

/// Set by the first processed frame, never cleared
#[derive(Debug, Default)]
pub struct ConnectionLatch {
    connected: AtomicBool,
}

impl ConnectionLatch {
    pub const fn new() -> Self {
        Self {
            connected: AtomicBool::new(false),
        }
    }

    /// Latch the connected state
    ///
    /// Idempotent and callable from any task or interrupt.
    #[inline]
    pub fn mark_connected(&self) {
        // Release pairs with the Acquire in `is_connected` so the consumer
        // that sees the flag also sees the values stored before it.
        self.connected.store(true, Ordering::Release);
    }

    #[inline]
    pub fn is_connected(&self) -> bool {
        self.connected.load(Ordering::Acquire)
    }
}
