//! # eq-cli
//!
//! Command-line shell for the Eternal Quest goal ledger.
//!
//! - `quest goal create/list/record` - work with the project's ledger
//! - `quest save <file>` / `quest load <file>` - export and import ledgers
//! - `quest menu` - the interactive six-option menu

mod commands;
mod config;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use config::QuestConfig;

/// Eternal Quest: track goals and earn points.
#[derive(Parser)]
#[command(name = "quest", version, about)]
struct Cli {
    /// Project root directory (defaults to current directory).
    #[arg(long, default_value = ".")]
    project_root: PathBuf,

    /// Log ledger activity to stderr.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create, list, and record events against goals.
    Goal {
        #[command(subcommand)]
        command: commands::goal::GoalCommands,
    },
    /// Export the working ledger to a file.
    Save {
        /// Destination ledger file.
        file: PathBuf,
    },
    /// Replace the working ledger with a ledger file.
    Load {
        /// Source ledger file.
        file: PathBuf,
    },
    /// Run the interactive menu.
    Menu {
        /// Start from the working ledger instead of an empty one.
        #[arg(long)]
        resume: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so they never mix with listings on stdout.
    let level = if cli.verbose { "info" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive(format!("eq_goal={}", level).parse()?)
                .add_directive(format!("eq_cli={}", level).parse()?),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    let project_root = cli.project_root.canonicalize().unwrap_or(cli.project_root);
    let config = QuestConfig::load(&project_root)?;

    match &cli.command {
        Commands::Goal { command } => commands::goal::execute(command, &config),
        Commands::Save { file } => commands::ledger::save(&config, file),
        Commands::Load { file } => commands::ledger::load(&config, file),
        Commands::Menu { resume } => commands::menu::execute(&config, *resume),
    }
}
