//! Error types for singlet
//!
//! ## Error Codes (Canonical)
//!
//! Every variant maps to a stable code, used by the CLI report output:
//!
//! | Code | Description |
//! |------|-------------|
//! | Construction | Singleton payload could not be built |
//! | Io | Append to the audit destination failed |
//! | Overflow | Sequence counter reached its maximum |
//! | NotPreloaded | Eager singleton read before the startup phase |
//! | AlreadyPreloaded | Eager singleton preloaded twice |
//! | LockTimeout | Mutation lock deadline elapsed |
//! | InvalidMessage | Audit message would span more than one line |
//! | ConfigConflict | Audit log asked to bind to a second destination |

use std::io;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// All singlet errors.
#[derive(Debug, Error)]
pub enum Error {
    /// Building a singleton payload failed.
    ///
    /// On the lazy path the cell stays empty and the next caller retries.
    /// On the eager path this aborts startup.
    #[error("failed to construct singleton `{singleton}`: {source}")]
    Construction {
        /// Name of the singleton cell
        singleton: &'static str,
        /// Underlying cause
        #[source]
        source: io::Error,
    },

    /// Appending an audit line failed after the log already existed.
    #[error("audit append to {} failed: {source}", path.display())]
    Io {
        /// Destination being written
        path: PathBuf,
        /// Underlying cause
        #[source]
        source: io::Error,
    },

    /// The sequence counter cannot advance without wrapping.
    #[error("sequence overflow: counter is already at {current}")]
    Overflow {
        /// Value the counter holds
        current: u64,
    },

    /// An eager singleton was read before startup preloaded it.
    #[error("eager singleton `{0}` was read before startup preloaded it")]
    NotPreloaded(&'static str),

    /// An eager singleton was preloaded a second time.
    #[error("eager singleton `{0}` is already preloaded")]
    AlreadyPreloaded(&'static str),

    /// Waiting for a mutation lock exceeded the configured deadline.
    #[error("timed out after {waited:?} waiting for the {lock} lock")]
    LockTimeout {
        /// Which lock was contended
        lock: &'static str,
        /// How long the caller waited
        waited: Duration,
    },

    /// An audit message contained a line break.
    #[error("audit message must not contain line breaks")]
    InvalidMessage,

    /// The audit log is bound to one destination and a different one was requested.
    #[error(
        "audit log is bound to {}, refusing {}",
        configured.display(),
        requested.display()
    )]
    ConfigConflict {
        /// Destination chosen at first construction
        configured: PathBuf,
        /// Destination the caller asked for
        requested: PathBuf,
    },
}

/// Result type for singlet operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Stable error code for reports.
    pub fn code(&self) -> &'static str {
        match self {
            Error::Construction { .. } => "Construction",
            Error::Io { .. } => "Io",
            Error::Overflow { .. } => "Overflow",
            Error::NotPreloaded(_) => "NotPreloaded",
            Error::AlreadyPreloaded(_) => "AlreadyPreloaded",
            Error::LockTimeout { .. } => "LockTimeout",
            Error::InvalidMessage => "InvalidMessage",
            Error::ConfigConflict { .. } => "ConfigConflict",
        }
    }

    /// Check if this error is retryable.
    ///
    /// A retry may succeed once the environment changes (destination
    /// becomes writable, lock holder finishes).
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Error::Construction { .. } | Error::Io { .. } | Error::LockTimeout { .. }
        )
    }

    /// Check if this error signals a broken process invariant.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Error::Overflow { .. } | Error::NotPreloaded(_))
    }
}
