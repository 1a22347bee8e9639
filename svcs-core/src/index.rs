use crate::error::{Error, Result};
use crate::repository::CONTROL_DIR;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Component, Path, PathBuf};
use tracing::debug;

/// The ordered list of paths the user opted into versioning.
///
/// Backed by a newline-delimited file that only ever grows.
pub struct TrackedIndex {
    work_dir: PathBuf,
    index_path: PathBuf,
}

impl TrackedIndex {
    pub fn new(work_dir: impl Into<PathBuf>, index_path: impl Into<PathBuf>) -> Self {
        Self {
            work_dir: work_dir.into(),
            index_path: index_path.into(),
        }
    }

    /// Tracked paths in the order they were added. Duplicates are kept.
    pub fn list(&self) -> Result<Vec<String>> {
        let content = match fs::read_to_string(&self.index_path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        Ok(content
            .lines()
            .filter(|line| !line.is_empty())
            .map(String::from)
            .collect())
    }

    /// Tracked paths with later duplicates dropped.
    pub fn unique(&self) -> Result<Vec<String>> {
        let mut seen = std::collections::HashSet::new();
        Ok(self
            .list()?
            .into_iter()
            .filter(|path| seen.insert(path.clone()))
            .collect())
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.list()?.is_empty())
    }

    /// Appends `path` to the index. Returns the normalized form that was stored.
    pub fn track(&self, path: &str) -> Result<String> {
        let normalized = normalize_path(path)?;
        let full_path = self.work_dir.join(&normalized);

        let metadata = match fs::metadata(&full_path) {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(Error::FileNotFound(path.to_string()))
            }
            Err(e) => return Err(e.into()),
        };

        if !metadata.is_file() {
            return Err(Error::InvalidPath(format!("{} is not a regular file", path)));
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.index_path)?;
        writeln!(file, "{}", normalized)?;

        debug!("Tracking {}", normalized);
        Ok(normalized)
    }
}

/// Turns a user-supplied path into the relative, `/`-separated form used
/// both in the index and as the stored file name inside a snapshot.
pub fn normalize_path(path: &str) -> Result<String> {
    let mut parts = Vec::new();

    for component in Path::new(path).components() {
        match component {
            Component::Normal(part) => {
                let part = part
                    .to_str()
                    .ok_or_else(|| Error::InvalidPath(format!("{} is not valid UTF-8", path)))?;
                parts.push(part);
            }
            Component::CurDir => {}
            Component::ParentDir => {
                return Err(Error::InvalidPath(format!(
                    "{} points outside the working directory",
                    path
                )))
            }
            Component::RootDir | Component::Prefix(_) => {
                return Err(Error::InvalidPath(format!("{} is not a relative path", path)))
            }
        }
    }

    if parts.is_empty() {
        return Err(Error::InvalidPath(format!("{} does not name a file", path)));
    }
    if parts[0] == CONTROL_DIR {
        return Err(Error::InvalidPath(format!(
            "{} is inside the repository directory",
            path
        )));
    }
    if parts.iter().any(|part| part.contains(['\n', '\r'])) {
        return Err(Error::InvalidPath(format!("{:?} contains a line break", path)));
    }
    if parts.iter().any(|part| part.trim() != *part) {
        return Err(Error::InvalidPath(format!(
            "{:?} has leading or trailing whitespace",
            path
        )));
    }

    Ok(parts.join("/"))
}
