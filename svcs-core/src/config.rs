use crate::error::Result;
use std::fs;
use std::path::PathBuf;

/// The single-value store holding the active author name.
pub struct UserConfig {
    path: PathBuf,
}

impl UserConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The configured author, or `None` when unset.
    pub fn author(&self) -> Result<Option<String>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let name = content.trim();
        Ok((!name.is_empty()).then(|| name.to_string()))
    }

    pub fn set_author(&self, name: &str) -> Result<()> {
        fs::write(&self.path, name.trim())?;
        Ok(())
    }
}
