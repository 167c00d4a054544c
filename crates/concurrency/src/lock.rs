//! Mutation-lock acquisition
//!
//! Payload mutations are short (one increment, one append), so callers
//! normally block without a deadline. A deadline can be configured as a
//! hardening measure; hitting it returns `LockTimeout` and leaves the
//! payload untouched.

use parking_lot::{Mutex, MutexGuard};
use singlet_core::{Error, Result};
use std::time::Duration;

/// Lock `mutex`, waiting at most `deadline` when one is given.
pub fn lock_within<'a, T>(
    mutex: &'a Mutex<T>,
    lock: &'static str,
    deadline: Option<Duration>,
) -> Result<MutexGuard<'a, T>> {
    match deadline {
        None => Ok(mutex.lock()),
        Some(waited) => mutex
            .try_lock_for(waited)
            .ok_or(Error::LockTimeout { lock, waited }),
    }
}
