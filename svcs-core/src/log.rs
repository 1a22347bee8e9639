use crate::error::{Error, Result};
use crate::models::LogEntry;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use tracing::{debug, warn};

/// Append-only commit history, one JSON record per line.
pub struct CommitLog {
    path: PathBuf,
}

impl CommitLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Appends `entry` durably. A failed write is truncated away, so a
    /// partial or unsynced record never stays in the log.
    pub fn append(&self, entry: &LogEntry) -> Result<()> {
        self.append_with(entry, |file, line| {
            writeln!(file, "{}", line)?;
            file.sync_data()
        })
    }

    fn append_with<F>(&self, entry: &LogEntry, write: F) -> Result<()>
    where
        F: FnOnce(&mut File, &str) -> std::io::Result<()>,
    {
        let line = serde_json::to_string(entry)?;

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        let len = file.metadata()?.len();

        if let Err(e) = write(&mut file, &line) {
            warn!("Failed to append commit {}: {}", entry.id, e);
            if let Err(truncate_err) = file.set_len(len) {
                warn!("Failed to truncate log to {} bytes: {}", len, truncate_err);
            }
            return Err(e.into());
        }

        debug!("Appended commit {} to log", entry.id);
        Ok(())
    }

    /// Every entry in append order.
    pub fn all(&self) -> Result<Vec<LogEntry>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        content
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(i, line)| {
                serde_json::from_str(line).map_err(|e| Error::CorruptLog {
                    line: i + 1,
                    reason: e.to_string(),
                })
            })
            .collect()
    }

    pub fn latest(&self) -> Result<Option<LogEntry>> {
        Ok(self.all()?.pop())
    }

    pub fn len(&self) -> Result<usize> {
        Ok(self.all()?.len())
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.latest()?.is_none())
    }
}
