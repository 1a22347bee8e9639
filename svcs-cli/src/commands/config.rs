use anyhow::{Context, Result};
use colored::Colorize;
use std::io::Write;
use svcs_core::Repository;

pub fn run(repo: &Repository, name: Option<String>, out: &mut impl Write) -> Result<()> {
    let config = repo.config();

    if let Some(name) = name {
        config
            .set_author(&name)
            .context("Failed to write username")?;
        writeln!(out, "The username is {}.", name.trim().bold())?;
        return Ok(());
    }

    match config.author().context("Failed to read username")? {
        Some(author) => writeln!(out, "The username is {}.", author.bold())?,
        None => writeln!(out, "Please, tell me who you are.")?,
    }

    Ok(())
}
