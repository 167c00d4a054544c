//! Process startup phase.
//!
//! Eager singletons must exist before any caller can race on them. The
//! sequence generator is baked into the binary; the audit log needs its
//! destination, so the host process calls [`startup`] first thing in
//! `main`, before spawning threads. An error here means the process
//! should not start.
//!
//! ```ignore
//! fn main() {
//!     let config = StartupConfig::from_env();
//!     if let Err(e) = singlet::startup(&config) {
//!         eprintln!("{}", e);
//!         std::process::exit(1);
//!     }
//!     // ... spawn workers ...
//! }
//! ```

use crate::singletons::{EagerAuditLog, EagerSequence};
use crate::{AuditOptions, Result};
use tracing::info;

/// Configuration consumed by [`startup`].
#[derive(Debug, Clone, Default)]
pub struct StartupConfig {
    /// Options for the eager audit log
    pub audit: AuditOptions,
}

impl StartupConfig {
    /// Config for an eager audit log at the given options
    pub fn new(audit: AuditOptions) -> Self {
        StartupConfig { audit }
    }

    /// Config read from `SINGLET_AUDIT_PATH` / `SINGLET_AUDIT_STRICT`
    pub fn from_env() -> Self {
        StartupConfig {
            audit: AuditOptions::from_env(),
        }
    }
}

/// Construct every eager singleton.
///
/// Running it again keeps the installed singletons; a different audit
/// destination is handled by its conflict policy.
pub fn startup(config: &StartupConfig) -> Result<()> {
    let log = EagerAuditLog::preload(config.audit.clone())?;
    info!(
        sequence_current = EagerSequence::instance().current(),
        audit_path = %log.path().display(),
        durability = log.options().durability.description(),
        "eager singletons ready"
    );
    Ok(())
}
