//! Convenient imports for Singlet.
//!
//! ```ignore
//! use singlet::prelude::*;
//!
//! let n = LazySequence::next()?;
//! ```

// Singletons
pub use crate::singletons::{EagerAuditLog, EagerSequence, LazyAuditLog, LazySequence};

// Startup
pub use crate::startup::{startup, StartupConfig};

// Error handling
pub use singlet_core::{Error, Result};

// Configuration
pub use singlet_durability::DurabilityMode;
pub use singlet_primitives::{AuditOptions, ConflictPolicy};
