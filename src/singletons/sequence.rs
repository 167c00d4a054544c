//! Sequence generator singletons.
//!
//! # Example
//!
//! ```ignore
//! use singlet::prelude::*;
//!
//! let a = EagerSequence::instance();
//! assert_eq!(a.next()?, 1);
//! assert_eq!(EagerSequence::instance().next()?, 2);
//! ```

use crate::{Result, SequenceGenerator};
use singlet_concurrency::{EagerCell, LazyCell, Strategy};

static EAGER_SEQUENCE: EagerCell<SequenceGenerator> =
    EagerCell::new("eager-sequence", SequenceGenerator::new());

static LAZY_SEQUENCE: LazyCell<SequenceGenerator> = LazyCell::new("lazy-sequence");

/// Sequence generator that exists before `main` runs.
pub struct EagerSequence;

impl EagerSequence {
    /// The one shared generator
    pub fn instance() -> &'static SequenceGenerator {
        EAGER_SEQUENCE.acquire()
    }

    /// Shorthand for `instance().next()`
    pub fn next() -> Result<u64> {
        Self::instance().next()
    }

    /// Always [`Strategy::Eager`]
    pub fn strategy() -> Strategy {
        EAGER_SEQUENCE.strategy()
    }
}

/// Sequence generator built on first access.
pub struct LazySequence;

impl LazySequence {
    /// The one shared generator, created if this is the first access
    pub fn instance() -> &'static SequenceGenerator {
        LAZY_SEQUENCE.acquire_or(SequenceGenerator::new)
    }

    /// Shorthand for `instance().next()`
    pub fn next() -> Result<u64> {
        Self::instance().next()
    }

    /// Whether the first access has happened
    pub fn is_initialized() -> bool {
        LAZY_SEQUENCE.is_initialized()
    }

    /// Number of times the generator was constructed (0 or 1)
    pub fn constructions() -> u64 {
        LAZY_SEQUENCE.constructions()
    }

    /// Always [`Strategy::Lazy`]
    pub fn strategy() -> Strategy {
        LAZY_SEQUENCE.strategy()
    }
}
