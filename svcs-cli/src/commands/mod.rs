pub mod add;
pub mod checkout;
pub mod commit;
pub mod config;
pub mod log;

use anyhow::{Context, Result};
use std::io::Write;
use std::path::Path;
use svcs_core::Repository;

pub fn open_repository(dir: &Path) -> Result<Repository> {
    Repository::init(dir)
        .with_context(|| format!("Failed to open repository in {}", dir.display()))
}

pub fn print_summary(out: &mut impl Write) -> Result<()> {
    writeln!(
        out,
        "These are SVCS commands:
config     Get and set a username.
add        Add a file to the index.
log        Show commit logs.
commit     Save changes.
checkout   Restore a file."
    )?;
    Ok(())
}

pub fn unknown(args: &[String], out: &mut impl Write) -> Result<()> {
    let name = args.first().map(String::as_str).unwrap_or_default();
    writeln!(out, "'{}' is not a SVCS command.", name)?;
    Ok(())
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    /// Runs a command against a buffer and returns what it printed.
    pub fn output<F>(f: F) -> String
    where
        F: FnOnce(&mut Vec<u8>) -> Result<()>,
    {
        colored::control::set_override(false);
        let mut out = Vec::new();
        f(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    pub fn repo_with(files: &[(&str, &str)]) -> (TempDir, Repository) {
        let dir = TempDir::new().unwrap();
        let repo = Repository::init(dir.path()).unwrap();
        for (path, content) in files {
            fs::write(dir.path().join(path), content).unwrap();
        }
        (dir, repo)
    }
}

#[cfg(test)]
mod tests {
    use super::testing::output;
    use super::*;

    #[test]
    fn test_summary() {
        let text = output(|out| print_summary(out));

        assert!(text.starts_with("These are SVCS commands:\n"));
        assert!(text.contains("checkout   Restore a file.\n"));
    }

    #[test]
    fn test_unknown_command() {
        let text = output(|out| unknown(&["push".to_string(), "origin".to_string()], out));

        assert_eq!(text, "'push' is not a SVCS command.\n");
    }
}
