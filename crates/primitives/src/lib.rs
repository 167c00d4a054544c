//! Primitives for singlet
//!
//! The two payloads held by the process-wide singletons:
//! - SequenceGenerator: gap-free counter starting at 1
//! - AuditLog: serialized timestamped appends to one destination
//!
//! Each payload owns its own mutation lock. Neither knows whether it sits
//! in an eager or a lazy cell; the cell strategy only decides when it is
//! built.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod audit_log;
pub mod options;
pub mod sequence;

pub use audit_log::AuditLog;
pub use options::{AuditOptions, ConflictPolicy};
pub use sequence::SequenceGenerator;
