//! apig CLI tool

#![forbid(unsafe_code)]

use anyhow::Result;
use apig_cli_lib::config::DEFAULT_CONFIG_FILE;
use apig_cli_lib::{observability, GenCommand, NewCommand};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "apig")]
#[command(version)]
#[command(about = "Generate a gin + gorm CRUD API server", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new project skeleton with a starter apig.toml
    New {
        /// Project name
        name: String,
        /// Owner on the VCS host (also the media type vendor)
        #[arg(long)]
        user: String,
        /// VCS host
        #[arg(long, default_value = "github.com")]
        vcs: String,
        /// Directory to create the project in
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Generate controllers, routes, docs and database wiring
    Gen {
        /// Project file
        #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
        config: PathBuf,
        /// Output directory (defaults to the project file's directory)
        #[arg(long)]
        out: Option<PathBuf>,
        /// Directory of template overrides
        #[arg(long)]
        templates: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    observability::init()?;

    match cli.command {
        Commands::New {
            name,
            user,
            vcs,
            out,
        } => {
            let cmd = NewCommand::new(name, user, vcs, out)?;
            cmd.execute()?;
        }
        Commands::Gen {
            config,
            out,
            templates,
        } => {
            GenCommand::new(config, out, templates).execute()?;
        }
    }

    Ok(())
}
