use anyhow::{Context, Result};
use colored::Colorize;
use std::io::Write;
use svcs_core::{LogEntry, Repository};

pub fn run(repo: &Repository, out: &mut impl Write) -> Result<()> {
    let history = repo.history().context("Failed to read commit log")?;

    if history.is_empty() {
        writeln!(out, "No commits yet.")?;
        return Ok(());
    }

    for entry in &history {
        writeln!(out, "{}", format_entry(entry))?;
    }

    Ok(())
}

fn format_entry(entry: &LogEntry) -> String {
    format!(
        "{} {}\nAuthor: {}\n{}\n",
        "commit".yellow(),
        entry.id.yellow(),
        entry.author,
        entry.message
    )
}
