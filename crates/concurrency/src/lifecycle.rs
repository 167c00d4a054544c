//! Singleton cells
//!
//! Both cells hold at most one payload for the lifetime of the process.
//! Once published, a payload is never replaced or dropped before exit, so
//! every accessor hands out `&T` with the cell's lifetime.
//!
//! ## Eager
//!
//! ```text
//! static SEQ: EagerCell<Gen> = EagerCell::new("seq", Gen::new());   // baked into the binary
//! static LOG: StartupCell<Log> = StartupCell::new("log");            // filled by startup code
//!
//! acquire()  ->  plain read, no lock
//! ```
//!
//! ## Lazy (double-checked locking)
//!
//! ```text
//! acquire_with(init):
//!   1. read published instance        -> Some: return (fast path, no lock)
//!   2. lock creation guard
//!   3. read published instance again  -> Some: another thread won, return it
//!   4. init()                         -> Err: unlock, cell stays empty, return Err
//!   5. publish, unlock, return
//! ```
//!
//! Step 3 is what prevents two constructions. A failed `init()` does not
//! poison the cell: the next caller runs `init()` again.

use once_cell::sync::OnceCell;
use parking_lot::Mutex;
use singlet_core::{Error, Result};
use std::convert::Infallible;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, info, warn};

/// Initialization strategy of a singleton cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// Payload exists before first use
    Eager,
    /// Payload built on first use
    Lazy,
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::Eager => f.write_str("eager"),
            Strategy::Lazy => f.write_str("lazy"),
        }
    }
}

/// Singleton cell whose payload is built at compile time.
///
/// The payload is part of the static image, so it exists before any code
/// runs. Reading never locks.
pub struct EagerCell<T> {
    name: &'static str,
    instance: T,
}

impl<T> EagerCell<T> {
    /// Wrap a `const`-constructed payload
    pub const fn new(name: &'static str, instance: T) -> Self {
        EagerCell { name, instance }
    }

    /// Name used in logs and errors
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Always [`Strategy::Eager`]
    pub fn strategy(&self) -> Strategy {
        Strategy::Eager
    }

    /// The one shared payload
    pub fn acquire(&self) -> &T {
        &self.instance
    }
}

/// Eager singleton cell for payloads that need runtime configuration.
///
/// Startup code installs the payload with [`StartupCell::preload`] before
/// spawning any thread that uses it; a failure there is a startup failure
/// for the process. Reading never locks.
pub struct StartupCell<T> {
    name: &'static str,
    instance: OnceCell<T>,
}

impl<T> StartupCell<T> {
    /// Create an empty cell
    pub const fn new(name: &'static str) -> Self {
        StartupCell {
            name,
            instance: OnceCell::new(),
        }
    }

    /// Name used in logs and errors
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Always [`Strategy::Eager`]
    pub fn strategy(&self) -> Strategy {
        Strategy::Eager
    }

    /// Install the payload.
    ///
    /// Returns `AlreadyPreloaded` if a payload is already present; the
    /// existing payload is kept.
    pub fn preload(&self, init: impl FnOnce() -> Result<T>) -> Result<&T> {
        let mut built = false;
        let instance = self.instance.get_or_try_init(|| {
            built = true;
            init()
        })?;

        if built {
            Ok(instance)
        } else {
            Err(Error::AlreadyPreloaded(self.name))
        }
    }

    /// The payload, if startup installed it
    pub fn get(&self) -> Option<&T> {
        self.instance.get()
    }

    /// The one shared payload.
    ///
    /// Fails with `NotPreloaded` only if startup code never installed it,
    /// which is a wiring bug in the host process.
    pub fn acquire(&self) -> Result<&T> {
        self.get().ok_or(Error::NotPreloaded(self.name))
    }
}

/// Singleton cell whose payload is built on first access.
///
/// The fast path is a single acquire-load of the published instance. Only
/// callers that observe an empty cell take the creation guard.
pub struct LazyCell<T> {
    name: &'static str,
    instance: OnceCell<T>,
    /// Creation guard, never held while a payload is being mutated
    creation_guard: Mutex<()>,
    constructions: AtomicU64,
    failed_attempts: AtomicU64,
}

impl<T> LazyCell<T> {
    /// Create an empty cell
    pub const fn new(name: &'static str) -> Self {
        LazyCell {
            name,
            instance: OnceCell::new(),
            creation_guard: parking_lot::const_mutex(()),
            constructions: AtomicU64::new(0),
            failed_attempts: AtomicU64::new(0),
        }
    }

    /// Name used in logs and errors
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Always [`Strategy::Lazy`]
    pub fn strategy(&self) -> Strategy {
        Strategy::Lazy
    }

    /// The published payload, without triggering construction
    pub fn get(&self) -> Option<&T> {
        self.instance.get()
    }

    /// Whether a payload has been published
    pub fn is_initialized(&self) -> bool {
        self.instance.get().is_some()
    }

    /// Number of successful constructions (0 or 1)
    pub fn constructions(&self) -> u64 {
        self.constructions.load(Ordering::Acquire)
    }

    /// Number of constructions that returned an error
    pub fn failed_attempts(&self) -> u64 {
        self.failed_attempts.load(Ordering::Acquire)
    }

    /// The one shared payload, building it with `init` if none exists.
    ///
    /// `init` runs at most once per successful publication and only while
    /// the creation guard is held. Its error is returned to this caller and
    /// leaves the cell empty.
    pub fn acquire_with<E>(
        &self,
        init: impl FnOnce() -> std::result::Result<T, E>,
    ) -> std::result::Result<&T, E> {
        if let Some(instance) = self.instance.get() {
            return Ok(instance);
        }

        let _guard = self.creation_guard.lock();

        // Another caller may have published while we waited for the guard.
        if let Some(instance) = self.instance.get() {
            debug!(singleton = self.name, "lost construction race, using published instance");
            return Ok(instance);
        }

        match init() {
            Ok(value) => {
                self.constructions.fetch_add(1, Ordering::AcqRel);
                info!(singleton = self.name, strategy = %Strategy::Lazy, "singleton constructed");
                Ok(self.instance.get_or_init(|| value))
            }
            Err(e) => {
                let attempts = self.failed_attempts.fetch_add(1, Ordering::AcqRel) + 1;
                warn!(
                    singleton = self.name,
                    attempts,
                    "singleton construction failed, cell left empty for retry"
                );
                Err(e)
            }
        }
    }

    /// Infallible form of [`LazyCell::acquire_with`]
    pub fn acquire_or(&self, init: impl FnOnce() -> T) -> &T {
        match self.acquire_with(|| Ok::<T, Infallible>(init())) {
            Ok(instance) => instance,
            Err(never) => match never {},
        }
    }
}

impl<T> Default for LazyCell<T> {
    fn default() -> Self {
        Self::new("anonymous")
    }
}
