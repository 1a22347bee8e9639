use anyhow::{Context, Result};
use colored::Colorize;
use std::io::Write;
use svcs_core::{Error, Repository};

pub fn run(repo: &Repository, path: Option<String>, out: &mut impl Write) -> Result<()> {
    let Some(path) = path else {
        let tracked = repo.index().list().context("Failed to read index")?;
        if tracked.is_empty() {
            writeln!(out, "Add a file to the index.")?;
        } else {
            writeln!(out, "{}", "Tracked files:".bold())?;
            for path in tracked {
                writeln!(out, "{}", path)?;
            }
        }
        return Ok(());
    };

    match repo.track(&path) {
        Ok(_) => writeln!(out, "The file '{}' is tracked.", path.green())?,
        Err(Error::FileNotFound(_)) => writeln!(out, "Can't find '{}'.", path)?,
        Err(Error::InvalidPath(reason)) => {
            writeln!(out, "Can't track '{}': {}.", path, reason.yellow())?
        }
        Err(e) => return Err(e).context("Failed to update index"),
    }

    Ok(())
}
