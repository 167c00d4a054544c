//! Core types for singlet
//!
//! This crate holds the pieces every other layer agrees on:
//! - Error: the failure taxonomy shared by the singleton cells, the
//!   sequence generator and the audit log
//! - AuditTimestamp: wall-clock instants rendered as sortable ISO-8601

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod timestamp;

pub use error::{Error, Result};
pub use timestamp::AuditTimestamp;
