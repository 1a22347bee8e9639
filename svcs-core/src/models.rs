use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;

/// File contents keyed by tracked path, in path order.
pub type FileSet = BTreeMap<String, Vec<u8>>;

/// One record of the commit log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub id: String,
    pub author: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

impl LogEntry {
    pub fn new(id: String, author: String, message: String, timestamp: DateTime<Utc>) -> Self {
        Self {
            id,
            author,
            message,
            timestamp,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitOutcome {
    Committed(String),
    NothingToCommit,
}

impl CommitOutcome {
    pub fn is_committed(&self) -> bool {
        matches!(self, CommitOutcome::Committed(_))
    }
}

/// Derives a commit id from the creation time and the author.
///
/// Two commits of identical content get different ids; the id is not a
/// content address.
pub fn commit_id(timestamp: &DateTime<Utc>, author: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(timestamp.to_rfc3339_opts(chrono::SecondsFormat::Nanos, true));
    hasher.update(author.as_bytes());
    hex::encode(hasher.finalize())
}

pub(crate) fn content_digest(content: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(content);
    hasher.finalize().into()
}
