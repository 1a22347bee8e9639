use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Directory walk failed: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Commit not found: {0}")]
    CommitNotFound(String),

    #[error("Invalid path: {0}")]
    InvalidPath(String),

    #[error("Commit message must not be empty")]
    EmptyMessage,

    #[error("No author configured")]
    AuthorNotSet,

    #[error("Corrupt commit log at line {line}: {reason}")]
    CorruptLog { line: usize, reason: String },

    #[error("Snapshot already exists: {0}")]
    SnapshotExists(String),
}
