use crate::error::{Error, Result};
use crate::models::FileSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

const STAGING_PREFIX: &str = ".staging-";

/// Directory of immutable commit snapshots, one container per commit id.
pub struct SnapshotStore {
    root: PathBuf,
}

impl SnapshotStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolves the container for `id`. Anything but a single plain path
    /// component is never resolved.
    fn container(&self, id: &str) -> Result<PathBuf> {
        let valid = !id.is_empty()
            && !id.starts_with('.')
            && !id.contains(['/', '\\'])
            && !id.contains(char::is_whitespace);

        if !valid {
            return Err(Error::CommitNotFound(id.to_string()));
        }
        Ok(self.root.join(id))
    }

    pub fn exists(&self, id: &str) -> bool {
        self.container(id).map(|dir| dir.is_dir()).unwrap_or(false)
    }

    /// Ids of every published snapshot, sorted.
    pub fn ids(&self) -> Result<Vec<String>> {
        if !self.root.exists() {
            return Ok(Vec::new());
        }

        let mut ids = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let entry = entry?;
            if !entry.file_type()?.is_dir() {
                continue;
            }
            if let Some(name) = entry.file_name().to_str() {
                if !name.starts_with('.') {
                    ids.push(name.to_string());
                }
            }
        }
        ids.sort();
        Ok(ids)
    }

    /// Starts a new snapshot. Nothing becomes visible under `id` until
    /// [`SnapshotTransaction::publish`] succeeds.
    pub fn begin(&self, id: &str) -> Result<SnapshotTransaction> {
        let target = self
            .container(id)
            .map_err(|_| Error::InvalidPath(format!("invalid snapshot id: {}", id)))?;
        if target.exists() {
            return Err(Error::SnapshotExists(id.to_string()));
        }

        fs::create_dir_all(&self.root)?;
        let staging = self.root.join(format!("{}{}", STAGING_PREFIX, id));
        if staging.exists() {
            warn!("Removing stale staging directory {:?}", staging);
            fs::remove_dir_all(&staging)?;
        }
        fs::create_dir(&staging)?;

        Ok(SnapshotTransaction {
            id: id.to_string(),
            staging,
            target,
            state: TransactionState::Staging,
        })
    }

    /// Writes a complete snapshot in one step.
    pub fn write_snapshot(&self, id: &str, files: &FileSet) -> Result<()> {
        let mut txn = self.begin(id)?;
        for (path, content) in files {
            txn.add_file(path, content)?;
        }
        txn.publish()?;
        txn.commit();
        Ok(())
    }

    pub fn read_snapshot(&self, id: &str) -> Result<FileSet> {
        let dir = self.container(id)?;
        if !dir.is_dir() {
            return Err(Error::CommitNotFound(id.to_string()));
        }

        let mut files = FileSet::new();
        for entry in WalkDir::new(&dir).min_depth(1).follow_links(false) {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }
            let relative = entry
                .path()
                .strip_prefix(&dir)
                .map_err(|_| Error::InvalidPath(entry.path().display().to_string()))?;
            let name = relative
                .components()
                .map(|c| c.as_os_str().to_string_lossy().into_owned())
                .collect::<Vec<_>>()
                .join("/");
            files.insert(name, fs::read(entry.path())?);
        }

        Ok(files)
    }

    /// Content of one stored file, or `None` if the snapshot does not hold it.
    pub fn read_file(&self, id: &str, path: &str) -> Result<Option<Vec<u8>>> {
        let dir = self.container(id)?;
        if !dir.is_dir() {
            return Err(Error::CommitNotFound(id.to_string()));
        }

        match fs::read(dir.join(path)) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TransactionState {
    Staging,
    Published,
    Committed,
}

/// A snapshot being written.
///
/// Dropping the transaction before [`commit`](Self::commit) removes
/// everything it wrote, including a snapshot that was already published.
pub struct SnapshotTransaction {
    id: String,
    staging: PathBuf,
    target: PathBuf,
    state: TransactionState,
}

impl SnapshotTransaction {
    fn staged_path(&self, path: &str) -> Result<PathBuf> {
        if self.state != TransactionState::Staging {
            return Err(Error::SnapshotExists(self.id.clone()));
        }
        let dest = self.staging.join(path);
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)?;
        }
        Ok(dest)
    }

    pub fn add_file(&mut self, path: &str, content: &[u8]) -> Result<()> {
        let dest = self.staged_path(path)?;
        fs::write(dest, content)?;
        Ok(())
    }

    /// Copies `source` verbatim into the snapshot under `path`.
    pub fn copy_file(&mut self, path: &str, source: &Path) -> Result<()> {
        let dest = self.staged_path(path)?;
        fs::copy(source, dest)?;
        Ok(())
    }

    /// Moves the staged files into place under the snapshot id.
    pub fn publish(&mut self) -> Result<()> {
        if self.state != TransactionState::Staging {
            return Ok(());
        }
        if self.target.exists() {
            return Err(Error::SnapshotExists(self.id.clone()));
        }
        fs::rename(&self.staging, &self.target)?;
        self.state = TransactionState::Published;
        debug!("Published snapshot {}", self.id);
        Ok(())
    }

    /// Makes the snapshot permanent.
    pub fn commit(mut self) {
        self.state = TransactionState::Committed;
    }
}

impl Drop for SnapshotTransaction {
    fn drop(&mut self) {
        let leftover = match self.state {
            TransactionState::Committed => return,
            TransactionState::Staging => &self.staging,
            TransactionState::Published => &self.target,
        };

        warn!("Rolling back snapshot {}", self.id);
        if let Err(e) = fs::remove_dir_all(leftover) {
            warn!("Failed to remove {:?}: {}", leftover, e);
        }
    }
}
