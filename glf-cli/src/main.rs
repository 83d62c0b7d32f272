//! glf command-line entry point.

#![forbid(unsafe_code)]

use anyhow::Result;
use clap::{Parser, Subcommand};

use glf_cli::commands::CreateCommand;

#[derive(Parser)]
#[command(name = "glf")]
#[command(version)]
#[command(about = "Scaffold projects from remote template repositories", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new project from a template
    Create {
        /// Project name (also the target directory)
        name: String,

        /// Overwrite the target directory if it exists
        #[arg(short, long)]
        force: bool,

        /// Offer tags instead of branches as versions
        #[arg(long)]
        tags: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Create { name, force, tags } => {
            let cmd = CreateCommand::new(name, force, tags)?;
            cmd.execute()?;
        }
    }

    Ok(())
}
