//! Audit timestamps
//!
//! Timestamps are UTC with microsecond precision and a `Z` suffix, so the
//! rendered strings are fixed-width and sort lexicographically in time order.
//! Instants are truncated to that precision on construction, so the rendered
//! form parses back to an equal value.

use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Wall-clock instant stamped on each audit line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AuditTimestamp(DateTime<Utc>);

impl AuditTimestamp {
    /// Current wall-clock time
    pub fn now() -> Self {
        Self::from_datetime(Utc::now())
    }

    /// Wrap an existing instant, dropping sub-microsecond digits
    pub fn from_datetime(at: DateTime<Utc>) -> Self {
        AuditTimestamp(at.trunc_subsecs(6))
    }

    /// Parse the rendered form back into a timestamp
    pub fn parse(s: &str) -> Option<Self> {
        DateTime::parse_from_rfc3339(s)
            .ok()
            .map(|dt| Self::from_datetime(dt.with_timezone(&Utc)))
    }
}

impl fmt::Display for AuditTimestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.to_rfc3339_opts(SecondsFormat::Micros, true))
    }
}
