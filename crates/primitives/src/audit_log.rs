//! Audit log primitive
//!
//! Appends `<timestamp> - <message>\n` lines to one destination chosen at
//! construction. Construction writes the initialization banner, so the
//! banner precedes every entry.
//!
//! ## record() sequence
//!
//! ```text
//! 1. reject messages containing CR/LF
//! 2. stamp wall-clock time (before the lock)
//! 3. acquire mutation lock (optionally with deadline)
//! 4. open-append-write-close the whole line
//! 5. release lock (also on error)
//! ```
//!
//! Line order in the file is lock-acquisition order. Timestamps of
//! concurrent records are not guaranteed to be sorted.

use crate::options::{AuditOptions, ConflictPolicy};
use parking_lot::Mutex;
use singlet_concurrency::lock_within;
use singlet_core::{AuditTimestamp, Error, Result};
use singlet_durability::{AuditFile, AuditLine};
use std::io;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, error, warn};

const MUTATION_LOCK: &str = "audit-log mutation";

/// Serialized writer for one audit destination
#[derive(Debug)]
pub struct AuditLog {
    options: AuditOptions,
    file: Mutex<AuditFile>,
    records: AtomicU64,
}

impl AuditLog {
    /// Open the destination and write the banner.
    pub fn open(options: AuditOptions) -> io::Result<Self> {
        let file = AuditFile::open(options.path.clone(), options.durability)?;
        Ok(AuditLog {
            options,
            file: Mutex::new(file),
            records: AtomicU64::new(0),
        })
    }

    /// Destination this log is bound to
    pub fn path(&self) -> &Path {
        &self.options.path
    }

    /// Options the log was built with
    pub fn options(&self) -> &AuditOptions {
        &self.options
    }

    /// Number of successful `record()` calls
    pub fn records_written(&self) -> u64 {
        self.records.load(Ordering::Acquire)
    }

    /// Append one timestamped line.
    pub fn record(&self, message: &str) -> Result<()> {
        if message.contains(['\n', '\r']) {
            return Err(Error::InvalidMessage);
        }

        let line = AuditLine::new(AuditTimestamp::now(), message).encode();

        let mut file = lock_within(&self.file, MUTATION_LOCK, self.options.lock_deadline())?;
        match file.append_line(&line) {
            Ok(()) => {
                self.records.fetch_add(1, Ordering::AcqRel);
                debug!(path = %self.path().display(), entry = line.trim_end(), "logged action");
                Ok(())
            }
            Err(source) => {
                error!(path = %self.path().display(), error = %source, "failed to write audit line");
                Err(Error::Io {
                    path: self.options.path.clone(),
                    source,
                })
            }
        }
    }

    /// Reconcile a later request for this log with the bound destination.
    ///
    /// The first destination always wins. A different one is either
    /// ignored with a warning or rejected, per the requested policy.
    pub fn check_destination(&self, requested: &AuditOptions) -> Result<()> {
        if requested.path == self.options.path {
            return Ok(());
        }
        match requested.on_conflict {
            ConflictPolicy::Ignore => {
                warn!(
                    bound = %self.options.path.display(),
                    requested = %requested.path.display(),
                    "audit log already bound, ignoring requested destination"
                );
                Ok(())
            }
            ConflictPolicy::Reject => Err(Error::ConfigConflict {
                configured: self.options.path.clone(),
                requested: requested.path.clone(),
            }),
        }
    }
}
