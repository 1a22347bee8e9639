use crate::error::{Error, Result};
use crate::models::content_digest;
use crate::snapshot::SnapshotStore;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Decides whether the working copy of the tracked files differs from the
/// last committed snapshot.
pub struct ChangeDetector<'a> {
    work_dir: &'a Path,
    store: &'a SnapshotStore,
}

impl<'a> ChangeDetector<'a> {
    pub fn new(work_dir: &'a Path, store: &'a SnapshotStore) -> Self {
        Self { work_dir, store }
    }

    /// Returns true on the first tracked file whose content differs from the
    /// snapshot `last_commit`. With no previous commit there is always
    /// something to commit.
    pub fn has_changes(&self, tracked: &[String], last_commit: Option<&str>) -> Result<bool> {
        let Some(last_commit) = last_commit.filter(|id| !id.is_empty()) else {
            return Ok(true);
        };

        for path in tracked {
            let current = fs::read(self.work_dir.join(path)).map_err(|e| match e.kind() {
                std::io::ErrorKind::NotFound => Error::FileNotFound(path.clone()),
                _ => Error::Io(e),
            })?;

            let stored = self.store.read_file(last_commit, path)?;
            let stored_digest = stored.as_deref().map(content_digest);

            if stored_digest != Some(content_digest(&current)) {
                debug!("{} changed since {}", path, last_commit);
                return Ok(true);
            }
        }

        Ok(false)
    }
}
