//! Append-only audit destination
//!
//! Each append opens the file in append mode, issues one `write_all` of
//! the complete line, optionally syncs, and closes it again. Callers
//! serialize appends with their own mutation lock; `append_line` taking
//! `&mut self` makes that exclusivity explicit.

use crate::line::BANNER;
use crate::mode::DurabilityMode;
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Handle on one audit destination
#[derive(Debug)]
pub struct AuditFile {
    path: PathBuf,
    mode: DurabilityMode,
}

impl AuditFile {
    /// Bind to `path` and write the initialization banner.
    ///
    /// The file is created if missing and existing content is preserved.
    /// The parent directory must already exist.
    pub fn open(path: impl Into<PathBuf>, mode: DurabilityMode) -> io::Result<Self> {
        let mut file = AuditFile {
            path: path.into(),
            mode,
        };
        file.append_line(&format!("{BANNER}\n"))?;
        debug!(path = %file.path.display(), ?mode, "audit destination opened");
        Ok(file)
    }

    /// Destination path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Durability mode
    pub fn mode(&self) -> DurabilityMode {
        self.mode
    }

    /// Append one complete, newline-terminated line.
    ///
    /// On failure the file is truncated back to its length before the
    /// write, so no fragment of `line` remains.
    pub fn append_line(&mut self, line: &str) -> io::Result<()> {
        let mut file = OpenOptions::new().create(true).append(true).open(&self.path)?;
        append_to(&mut file, line, self.mode, &self.path)
    }
}

/// Something a line can be appended to and cut back from.
trait AppendTarget: Write {
    /// Current length in bytes
    fn end(&mut self) -> io::Result<u64>;
    /// Cut back to `len` bytes
    fn truncate(&mut self, len: u64) -> io::Result<()>;
    /// Force written data to disk
    fn sync(&mut self) -> io::Result<()>;
}

impl AppendTarget for File {
    fn end(&mut self) -> io::Result<u64> {
        Ok(self.metadata()?.len())
    }

    fn truncate(&mut self, len: u64) -> io::Result<()> {
        self.set_len(len)
    }

    fn sync(&mut self) -> io::Result<()> {
        self.sync_data()
    }
}

fn append_to<T: AppendTarget>(
    target: &mut T,
    line: &str,
    mode: DurabilityMode,
    path: &Path,
) -> io::Result<()> {
    debug_assert!(line.ends_with('\n'));

    let start = target.end()?;
    let written = target.write_all(line.as_bytes()).and_then(|()| {
        if mode.requires_fsync() {
            target.sync()
        } else {
            Ok(())
        }
    });

    if let Err(e) = written {
        if let Err(rollback) = target.truncate(start) {
            warn!(
                path = %path.display(),
                error = %rollback,
                "failed to roll back partial audit line"
            );
        }
        return Err(e);
    }
    Ok(())
}
