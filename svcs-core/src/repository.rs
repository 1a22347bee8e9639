use crate::config::UserConfig;
use crate::error::Result;
use crate::index::TrackedIndex;
use crate::log::CommitLog;
use crate::snapshot::SnapshotStore;
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use tracing::info;

/// Name of the control directory inside the working directory.
pub const CONTROL_DIR: &str = "vcs";

const INDEX_FILE: &str = "index.txt";
const LOG_FILE: &str = "log.txt";
const CONFIG_FILE: &str = "config.txt";
const COMMITS_DIR: &str = "commits";

/// Handle on a repository rooted at a working directory.
///
/// Holds paths only. Every operation re-reads the index, log and config
/// from disk, so two handles on the same directory never disagree.
#[derive(Debug, Clone)]
pub struct Repository {
    work_dir: PathBuf,
    control_dir: PathBuf,
}

impl Repository {
    /// Opens the repository in `work_dir`, creating the control directory
    /// and its empty files on first use.
    pub fn init<P: AsRef<Path>>(work_dir: P) -> Result<Self> {
        let work_dir = work_dir.as_ref().to_path_buf();
        let control_dir = work_dir.join(CONTROL_DIR);
        let repo = Self {
            work_dir,
            control_dir,
        };

        if !repo.control_dir.is_dir() {
            info!("Initializing repository in {:?}", repo.control_dir);
        }
        fs::create_dir_all(repo.control_dir.join(COMMITS_DIR))?;
        for name in [INDEX_FILE, LOG_FILE, CONFIG_FILE] {
            OpenOptions::new()
                .create(true)
                .append(true)
                .open(repo.control_dir.join(name))?;
        }

        Ok(repo)
    }

    pub fn is_initialized<P: AsRef<Path>>(work_dir: P) -> bool {
        work_dir.as_ref().join(CONTROL_DIR).is_dir()
    }

    pub fn work_dir(&self) -> &Path {
        &self.work_dir
    }

    pub fn control_dir(&self) -> &Path {
        &self.control_dir
    }

    pub fn index(&self) -> TrackedIndex {
        TrackedIndex::new(&self.work_dir, self.control_dir.join(INDEX_FILE))
    }

    pub fn log(&self) -> CommitLog {
        CommitLog::new(self.control_dir.join(LOG_FILE))
    }

    pub fn snapshots(&self) -> SnapshotStore {
        SnapshotStore::new(self.control_dir.join(COMMITS_DIR))
    }

    pub fn config(&self) -> UserConfig {
        UserConfig::new(self.control_dir.join(CONFIG_FILE))
    }

    pub fn track(&self, path: &str) -> Result<String> {
        self.index().track(path)
    }
}
