//! Sequence generator primitive
//!
//! A single `u64` counter behind a mutex. `next()` is the only mutation:
//! lock, increment by exactly one, read, unlock. The order in which
//! callers acquire the lock is the order of the values they get back.
//!
//! ## Overflow
//!
//! The counter never wraps. At `u64::MAX` every further `next()` returns
//! `Overflow` and the counter stays where it is.

use parking_lot::Mutex;
use singlet_core::{Error, Result};
use tracing::debug;

/// Shared, strictly increasing counter
#[derive(Debug)]
pub struct SequenceGenerator {
    /// Last value handed out (0 before the first `next()`)
    current: Mutex<u64>,
}

impl SequenceGenerator {
    /// Counter whose first `next()` returns 1
    pub const fn new() -> Self {
        Self::starting_after(0)
    }

    /// Counter whose first `next()` returns `current + 1`
    pub const fn starting_after(current: u64) -> Self {
        SequenceGenerator {
            current: parking_lot::const_mutex(current),
        }
    }

    /// Advance the counter and return the new value.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&self) -> Result<u64> {
        let mut current = self.current.lock();
        let next = current
            .checked_add(1)
            .ok_or(Error::Overflow { current: *current })?;
        *current = next;
        debug!(value = next, "next sequence number generated");
        Ok(next)
    }

    /// Last value handed out, i.e. the running total
    pub fn current(&self) -> u64 {
        *self.current.lock()
    }
}

impl Default for SequenceGenerator {
    fn default() -> Self {
        Self::new()
    }
}
