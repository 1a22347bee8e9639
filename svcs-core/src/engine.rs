//! Commit and checkout, orchestrated over the index, the change detector,
//! the snapshot store and the commit log.

use crate::detector::ChangeDetector;
use crate::error::{Error, Result};
use crate::models::{commit_id, CommitOutcome, LogEntry};
use crate::repository::Repository;
use crate::snapshot::SnapshotStore;
use chrono::{DateTime, Utc};
use std::fs;
use tracing::{debug, info};

impl Repository {
    /// Snapshots every tracked file if anything changed since the last
    /// commit.
    ///
    /// The snapshot is published before the log entry is appended, and is
    /// removed again if the append fails, so the log and the snapshot store
    /// always hold the same set of commits.
    pub fn commit(&self, message: &str, author: &str) -> Result<CommitOutcome> {
        if message.trim().is_empty() {
            return Err(Error::EmptyMessage);
        }
        if author.trim().is_empty() {
            return Err(Error::AuthorNotSet);
        }

        let tracked = self.index().unique()?;
        if tracked.is_empty() {
            debug!("Nothing tracked");
            return Ok(CommitOutcome::NothingToCommit);
        }

        let log = self.log();
        let store = self.snapshots();
        let last = log.latest()?;
        let detector = ChangeDetector::new(self.work_dir(), &store);

        if !detector.has_changes(&tracked, last.as_ref().map(|e| e.id.as_str()))? {
            debug!("No changes since {:?}", last.map(|e| e.id));
            return Ok(CommitOutcome::NothingToCommit);
        }

        let (timestamp, id) = fresh_id(&store, author);
        let mut txn = store.begin(&id)?;
        for path in &tracked {
            let source = self.work_dir().join(path);
            txn.copy_file(path, &source).map_err(|e| match e {
                Error::Io(io) if io.kind() == std::io::ErrorKind::NotFound => {
                    Error::FileNotFound(path.clone())
                }
                other => other,
            })?;
        }
        txn.publish()?;

        let entry = LogEntry::new(id.clone(), author.to_string(), message.to_string(), timestamp);
        log.append(&entry)?;
        txn.commit();

        info!("Committed {} ({} files) by {}", id, tracked.len(), author);
        Ok(CommitOutcome::Committed(id))
    }

    /// Overwrites the working copies with the files stored in commit `id`.
    ///
    /// Returns the restored paths. A failure part way through leaves the
    /// files restored so far in place.
    pub fn checkout(&self, id: &str) -> Result<Vec<String>> {
        let files = self.snapshots().read_snapshot(id)?;

        let mut restored = Vec::with_capacity(files.len());
        for (path, content) in &files {
            let dest = self.work_dir().join(path);
            if let Some(parent) = dest.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(&dest, content)?;
            restored.push(path.clone());
        }

        info!("Checked out {} ({} files)", id, restored.len());
        Ok(restored)
    }

    /// Log entries, most recent first.
    pub fn history(&self) -> Result<Vec<LogEntry>> {
        let mut entries = self.log().all()?;
        entries.reverse();
        Ok(entries)
    }
}

fn fresh_id(store: &SnapshotStore, author: &str) -> (DateTime<Utc>, String) {
    loop {
        let timestamp = Utc::now();
        let id = commit_id(&timestamp, author);
        if !store.exists(&id) {
            return (timestamp, id);
        }
    }
}
