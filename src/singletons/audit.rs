//! Audit log singletons.
//!
//! The destination is fixed by the first successful construction. Later
//! calls that name another destination get the bound log back (or a
//! `ConfigConflict` error under
//! [`ConflictPolicy::Reject`](crate::ConflictPolicy::Reject)).
//!
//! # Example
//!
//! ```ignore
//! use singlet::prelude::*;
//!
//! let log = LazyAuditLog::instance(&AuditOptions::new("lazy_audit.log"))?;
//! log.record("user 42 logged in")?;
//! ```

use crate::{AuditLog, AuditOptions, Error, Result};
use singlet_concurrency::{LazyCell, StartupCell, Strategy};

static EAGER_AUDIT: StartupCell<AuditLog> = StartupCell::new("eager-audit-log");

static LAZY_AUDIT: LazyCell<AuditLog> = LazyCell::new("lazy-audit-log");

/// Audit log installed during process startup.
pub struct EagerAuditLog;

impl EagerAuditLog {
    /// Open the destination and install the log.
    ///
    /// Called once from startup code, before any thread that records is
    /// spawned. If the log is already installed it is returned as is and
    /// `options` only go through the destination check, as for
    /// [`LazyAuditLog::instance`].
    pub fn preload(options: AuditOptions) -> Result<&'static AuditLog> {
        let opened = EAGER_AUDIT.preload(|| {
            AuditLog::open(options.clone()).map_err(|source| Error::Construction {
                singleton: EAGER_AUDIT.name(),
                source,
            })
        });
        match opened {
            Err(Error::AlreadyPreloaded(_)) => {
                let log = EAGER_AUDIT.acquire()?;
                log.check_destination(&options)?;
                Ok(log)
            }
            other => other,
        }
    }

    /// The one shared log
    pub fn instance() -> Result<&'static AuditLog> {
        EAGER_AUDIT.acquire()
    }

    /// Shorthand for `instance()?.record(message)`
    pub fn record(message: &str) -> Result<()> {
        Self::instance()?.record(message)
    }

    /// Always [`Strategy::Eager`]
    pub fn strategy() -> Strategy {
        EAGER_AUDIT.strategy()
    }
}

/// Audit log built on first access.
pub struct LazyAuditLog;

impl LazyAuditLog {
    /// The one shared log, opening `options.path` if this is the first
    /// successful access.
    ///
    /// A failed open is returned to this caller and the next call tries
    /// again, possibly with different options.
    pub fn instance(options: &AuditOptions) -> Result<&'static AuditLog> {
        let log = LAZY_AUDIT.acquire_with(|| {
            AuditLog::open(options.clone()).map_err(|source| Error::Construction {
                singleton: LAZY_AUDIT.name(),
                source,
            })
        })?;
        log.check_destination(options)?;
        Ok(log)
    }

    /// The log, if it has been built
    pub fn get() -> Option<&'static AuditLog> {
        LAZY_AUDIT.get()
    }

    /// Number of times the log was constructed (0 or 1)
    pub fn constructions() -> u64 {
        LAZY_AUDIT.constructions()
    }

    /// Number of constructions that failed
    pub fn failed_attempts() -> u64 {
        LAZY_AUDIT.failed_attempts()
    }

    /// Always [`Strategy::Lazy`]
    pub fn strategy() -> Strategy {
        LAZY_AUDIT.strategy()
    }
}
