//! Audit line format
//!
//! ```text
//! === Audit Log Initialized ===\n                 banner, once per open
//! 2024-03-09T07:05:01.000000Z - user logged in\n   one per record()
//! ```
//!
//! The banner has no timestamp prefix, so it can never be mistaken for an
//! entry.

use singlet_core::AuditTimestamp;
use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

/// Marker line written when a destination is first opened
pub const BANNER: &str = "=== Audit Log Initialized ===";

const SEPARATOR: &str = " - ";

/// One timestamped audit entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditLine {
    /// When `record()` was called
    pub timestamp: AuditTimestamp,
    /// Caller's message, free of line breaks
    pub message: String,
}

impl AuditLine {
    /// Create a line stamped with the given time
    pub fn new(timestamp: AuditTimestamp, message: impl Into<String>) -> Self {
        AuditLine {
            timestamp,
            message: message.into(),
        }
    }

    /// Render including the trailing newline, ready for a single write
    pub fn encode(&self) -> String {
        format!("{}\n", self)
    }

    /// Parse a line without its trailing newline
    pub fn parse(line: &str) -> Option<Self> {
        let (ts, message) = line.split_once(SEPARATOR)?;
        let timestamp = AuditTimestamp::parse(ts)?;
        Some(AuditLine {
            timestamp,
            message: message.to_string(),
        })
    }
}

impl fmt::Display for AuditLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.timestamp, SEPARATOR, self.message)
    }
}

/// A line read back from an audit destination
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogLine {
    /// The initialization banner
    Banner,
    /// A well-formed entry
    Entry(AuditLine),
    /// Anything else
    Malformed(String),
}

impl LogLine {
    /// Classify one line (without its newline)
    pub fn classify(line: &str) -> Self {
        if line == BANNER {
            return LogLine::Banner;
        }
        match AuditLine::parse(line) {
            Some(entry) => LogLine::Entry(entry),
            None => LogLine::Malformed(line.to_string()),
        }
    }
}

/// Read and classify every line of a destination.
///
/// A trailing fragment without a newline is reported as `Malformed`.
pub fn read_log(path: impl AsRef<Path>) -> io::Result<Vec<LogLine>> {
    let contents = fs::read_to_string(path)?;
    let mut lines = Vec::new();
    let mut rest = contents.as_str();

    while let Some(end) = rest.find('\n') {
        lines.push(LogLine::classify(&rest[..end]));
        rest = &rest[end + 1..];
    }
    if !rest.is_empty() {
        lines.push(LogLine::Malformed(rest.to_string()));
    }
    Ok(lines)
}
