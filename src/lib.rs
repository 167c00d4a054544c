//! # Singlet
//!
//! Process-wide shared services with race-free one-time initialization.
//!
//! Two services are provided, each under two initialization strategies:
//!
//! - a sequence generator handing out `1, 2, 3, ...` with no gaps or
//!   repeats across all threads
//! - an audit log appending `<timestamp> - <message>` lines to one
//!   destination without interleaving
//!
//! ## Quick Start
//!
//! ```ignore
//! use singlet::prelude::*;
//!
//! // Eager: the audit log is installed before any worker exists
//! singlet::startup(&StartupConfig::new(AuditOptions::new("eager_audit.log")))?;
//! EagerAuditLog::record("service started")?;
//! let id = EagerSequence::next()?;
//!
//! // Lazy: built on first access
//! let log = LazyAuditLog::instance(&AuditOptions::new("lazy_audit.log"))?;
//! log.record("first lazy action")?;
//! let id = LazySequence::next()?;
//! ```
//!
//! ## Layers
//!
//! - [`singlet_concurrency`] - singleton cells (eager, startup, lazy)
//! - [`singlet_primitives`] - the payloads and their mutation locks
//! - [`singlet_durability`] - the append-only destination file
//! - [`singlet_core`] - errors and timestamps

#![warn(missing_docs)]

mod singletons;
mod startup;

pub mod prelude;

pub use singletons::{EagerAuditLog, EagerSequence, LazyAuditLog, LazySequence};
pub use startup::{startup, StartupConfig};

// Re-export the layers
pub use singlet_concurrency::{EagerCell, LazyCell, StartupCell, Strategy};
pub use singlet_core::{AuditTimestamp, Error, Result};
pub use singlet_durability::{read_log, AuditLine, DurabilityMode, LogLine, BANNER};
pub use singlet_primitives::{AuditLog, AuditOptions, ConflictPolicy, SequenceGenerator};
