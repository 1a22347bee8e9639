use anyhow::{Context, Result};
use colored::Colorize;
use std::io::Write;
use svcs_core::{Error, Repository};

pub fn run(repo: &Repository, commit_id: Option<String>, out: &mut impl Write) -> Result<()> {
    let Some(commit_id) = commit_id else {
        writeln!(out, "Commit id was not passed.")?;
        return Ok(());
    };

    match repo.checkout(&commit_id) {
        Ok(_) => writeln!(out, "Switched to commit {}.", commit_id.yellow())?,
        Err(Error::CommitNotFound(_)) => writeln!(out, "Commit does not exist.")?,
        Err(e) => return Err(e).context("Checkout failed"),
    }

    Ok(())
}
