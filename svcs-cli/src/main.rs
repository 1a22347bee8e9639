use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

use commands::{add, checkout, commit, config, log};

#[derive(Parser)]
#[command(name = "svcs")]
#[command(version, about = "A simple version control system", long_about = None)]
#[command(
    allow_external_subcommands = true,
    disable_help_subcommand = true,
    disable_help_flag = true
)]
struct Cli {
    /// Working directory of the repository
    #[arg(short, long, global = true, env = "SVCS_DIR", default_value = ".")]
    dir: PathBuf,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    /// Print the command summary
    #[arg(short, long, global = true, action = ArgAction::SetTrue)]
    help: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Get and set a username
    Config {
        /// New username
        name: Option<String>,
    },

    /// Add a file to the index
    Add {
        /// File to track
        path: Option<String>,
    },

    /// Show commit logs
    Log,

    /// Save changes
    Commit {
        /// Commit message; only the first argument is used
        #[arg(trailing_var_arg = true)]
        message: Vec<String>,
    },

    /// Restore a file
    Checkout {
        /// Commit ID to switch to
        commit_id: Option<String>,
    },

    #[command(external_subcommand)]
    Unknown(Vec<String>),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let mut out = std::io::stdout().lock();

    let command = match cli.command {
        Some(command) if !cli.help => command,
        _ => return commands::print_summary(&mut out),
    };

    let repo = commands::open_repository(&cli.dir)?;

    match command {
        Commands::Config { name } => config::run(&repo, name, &mut out)?,
        Commands::Add { path } => add::run(&repo, path, &mut out)?,
        Commands::Log => log::run(&repo, &mut out)?,
        Commands::Commit { message } => {
            commit::run(&repo, message.into_iter().next(), &mut out)?
        }
        Commands::Checkout { commit_id } => checkout::run(&repo, commit_id, &mut out)?,
        Commands::Unknown(args) => commands::unknown(&args, &mut out)?,
    }

    Ok(())
}
