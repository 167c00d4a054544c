//! Durability mode for audit appends.

use serde::{Deserialize, Serialize};

/// Durability mode for audit appends.
///
/// Every append is closed before `record()` returns, so data always
/// reaches the OS. The mode only controls whether it is forced to disk.
///
/// | Mode | fsync | Use case |
/// |------|-------|----------|
/// | Flush | never | Default, survives process crash |
/// | Strict | every append | Survives power loss |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DurabilityMode {
    /// Write and close, leave syncing to the OS.
    #[default]
    Flush,

    /// `sync_data` after every append.
    Strict,
}

impl DurabilityMode {
    /// Check if this mode requires an fsync on every append.
    pub fn requires_fsync(&self) -> bool {
        matches!(self, DurabilityMode::Strict)
    }

    /// Human-readable description of the mode.
    pub fn description(&self) -> &'static str {
        match self {
            DurabilityMode::Flush => "Write and close (survives process crash)",
            DurabilityMode::Strict => "fsync every append (survives power loss)",
        }
    }
}
