//! Concurrency layer for singlet
//!
//! This crate implements the singleton lifecycle shared by every
//! process-wide service:
//! - EagerCell: payload baked into the static image
//! - StartupCell: eager payload installed by startup code before callers exist
//! - LazyCell: payload built on first access via double-checked locking
//! - lock_within: mutation-lock acquisition with an optional deadline
//!
//! The creation guard inside `LazyCell` and the mutation locks taken by
//! payloads are always distinct locks.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod lifecycle;
pub mod lock;

pub use lifecycle::{EagerCell, LazyCell, StartupCell, Strategy};
pub use lock::lock_within;
