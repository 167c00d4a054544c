//! Durability layer for singlet
//!
//! This crate implements the append-only audit destination:
//! - AuditFile: open-append-write-close per line, one banner per open
//! - AuditLine: the `<timestamp> - <message>` line format and its parser
//! - DurabilityMode: whether each append is fsynced
//!
//! The file is never rewritten or truncated below its length at the
//! start of an append. A failed append rolls the file back to that length
//! so no partial line is left behind.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod file;
pub mod line;
pub mod mode;

pub use file::AuditFile;
pub use line::{read_log, AuditLine, LogLine, BANNER};
pub use mode::DurabilityMode;
