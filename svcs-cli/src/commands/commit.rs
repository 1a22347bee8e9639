use anyhow::{Context, Result};
use colored::Colorize;
use std::io::Write;
use svcs_core::{CommitOutcome, Error, Repository};
use tracing::info;

pub fn run(repo: &Repository, message: Option<String>, out: &mut impl Write) -> Result<()> {
    let Some(message) = message.filter(|m| !m.trim().is_empty()) else {
        writeln!(out, "Message was not passed.")?;
        return Ok(());
    };

    let Some(author) = repo.config().author().context("Failed to read username")? else {
        writeln!(out, "Please, tell me who you are.")?;
        return Ok(());
    };

    match repo.commit(&message, &author) {
        Ok(CommitOutcome::Committed(id)) => {
            info!("Created commit {}", id);
            writeln!(out, "{}", "Changes are committed.".green())?;
        }
        Ok(CommitOutcome::NothingToCommit) => {
            writeln!(out, "{}", "Nothing to commit.".yellow())?
        }
        Err(Error::FileNotFound(path)) => {
            writeln!(out, "Can't find tracked file '{}'.", path.red())?
        }
        Err(e) => return Err(e).context("Commit failed"),
    }

    Ok(())
}
