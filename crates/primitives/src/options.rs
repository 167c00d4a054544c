//! Audit log configuration
//!
//! Options are consumed once, by the construction that wins the singleton
//! cell. Later constructions only compare their destination against the
//! bound one (see [`ConflictPolicy`]).
//!
//! ```ignore
//! let log = AuditOptions::new("/var/log/app/audit.log")
//!     .strict()
//!     .lock_timeout(Duration::from_millis(250))
//!     .open()?;
//! ```

use crate::audit_log::AuditLog;
use serde::{Deserialize, Serialize};
use singlet_durability::DurabilityMode;
use std::env;
use std::io;
use std::path::PathBuf;
use std::time::Duration;

/// Destination used when none is configured
pub const DEFAULT_AUDIT_PATH: &str = "audit.log";

/// Environment variable overriding the destination path
pub const ENV_AUDIT_PATH: &str = "SINGLET_AUDIT_PATH";

/// Environment variable enabling strict durability (`1`/`true`)
pub const ENV_AUDIT_STRICT: &str = "SINGLET_AUDIT_STRICT";

/// What to do when a caller asks for a different destination than the
/// one the audit log is already bound to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictPolicy {
    /// Keep the bound destination, log a warning
    #[default]
    Ignore,
    /// Return `ConfigConflict`
    Reject,
}

/// Options for opening an audit log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuditOptions {
    /// Destination file; its parent directory must exist
    pub path: PathBuf,
    /// fsync policy for each append
    pub durability: DurabilityMode,
    /// Deadline for the mutation lock, in milliseconds
    pub lock_timeout_ms: Option<u64>,
    /// Handling of a second, different destination
    pub on_conflict: ConflictPolicy,
}

impl AuditOptions {
    /// Options for the given destination
    pub fn new(path: impl Into<PathBuf>) -> Self {
        AuditOptions {
            path: path.into(),
            ..Self::default()
        }
    }

    /// Defaults overridden by `SINGLET_AUDIT_PATH` / `SINGLET_AUDIT_STRICT`
    pub fn from_env() -> Self {
        let mut options = Self::default();
        if let Some(path) = env::var_os(ENV_AUDIT_PATH) {
            options.path = PathBuf::from(path);
        }
        if let Ok(strict) = env::var(ENV_AUDIT_STRICT) {
            if matches!(strict.trim(), "1" | "true" | "yes") {
                options.durability = DurabilityMode::Strict;
            }
        }
        options
    }

    /// Set the destination
    pub fn path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = path.into();
        self
    }

    /// fsync every append
    pub fn strict(mut self) -> Self {
        self.durability = DurabilityMode::Strict;
        self
    }

    /// Set the durability mode
    pub fn durability(mut self, mode: DurabilityMode) -> Self {
        self.durability = mode;
        self
    }

    /// Give up on the mutation lock after `timeout`
    pub fn lock_timeout(mut self, timeout: Duration) -> Self {
        self.lock_timeout_ms = Some(timeout.as_millis().try_into().unwrap_or(u64::MAX));
        self
    }

    /// Set the conflict policy
    pub fn on_conflict(mut self, policy: ConflictPolicy) -> Self {
        self.on_conflict = policy;
        self
    }

    /// Mutation-lock deadline, if any
    pub fn lock_deadline(&self) -> Option<Duration> {
        self.lock_timeout_ms.map(Duration::from_millis)
    }

    /// Open an audit log with these options
    pub fn open(self) -> io::Result<AuditLog> {
        AuditLog::open(self)
    }
}

impl Default for AuditOptions {
    fn default() -> Self {
        AuditOptions {
            path: PathBuf::from(DEFAULT_AUDIT_PATH),
            durability: DurabilityMode::default(),
            lock_timeout_ms: None,
            on_conflict: ConflictPolicy::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = AuditOptions::default();
        assert_eq!(options.path, PathBuf::from("audit.log"));
        assert_eq!(options.durability, DurabilityMode::Flush);
        assert_eq!(options.lock_deadline(), None);
        assert_eq!(options.on_conflict, ConflictPolicy::Ignore);
    }

    #[test]
    fn test_builder() {
        let options = AuditOptions::new("a.log")
            .strict()
            .lock_timeout(Duration::from_millis(250))
            .on_conflict(ConflictPolicy::Reject);
        assert_eq!(options.path, PathBuf::from("a.log"));
        assert_eq!(options.durability, DurabilityMode::Strict);
        assert_eq!(options.lock_deadline(), Some(Duration::from_millis(250)));
        assert_eq!(options.on_conflict, ConflictPolicy::Reject);
    }

    #[test]
    fn test_deserialize_partial_json() {
        let options: AuditOptions =
            serde_json::from_str(r#"{"path": "/tmp/x.log", "on_conflict": "reject"}"#).unwrap();
        assert_eq!(options.path, PathBuf::from("/tmp/x.log"));
        assert_eq!(options.on_conflict, ConflictPolicy::Reject);
        assert_eq!(options.durability, DurabilityMode::Flush);
    }

    #[test]
    fn test_deserialize_strict() {
        let options: AuditOptions =
            serde_json::from_str(r#"{"durability": "strict", "lock_timeout_ms": 5}"#).unwrap();
        assert_eq!(options.durability, DurabilityMode::Strict);
        assert_eq!(options.lock_deadline(), Some(Duration::from_millis(5)));
        assert_eq!(options.path, PathBuf::from(DEFAULT_AUDIT_PATH));
    }
}
