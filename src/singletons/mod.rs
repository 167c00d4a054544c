//! Process-wide singletons.
//!
//! Each service is offered under both initialization strategies. After
//! the instance exists the two behave identically:
//!
//! | Service | Eager | Lazy |
//! |---------|-------|------|
//! | Sequence generator | [`EagerSequence`] (baked into the binary) | [`LazySequence`] |
//! | Audit log | [`EagerAuditLog`] (installed by [`startup`](crate::startup)) | [`LazyAuditLog`] |
//!
//! The eager and lazy variants are separate singletons with separate
//! state: the eager sequence and the lazy sequence count independently.

mod audit;
mod sequence;

pub use audit::{EagerAuditLog, LazyAuditLog};
pub use sequence::{EagerSequence, LazySequence};
