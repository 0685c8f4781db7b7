//! CLI for resolving and fetching viewer models.

mod commands;

use anyhow::Result;
use clap::{Args, CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use commands::{run_fetch, run_name, run_resolve};

/// Top-level CLI for bimfetch.
#[derive(Debug, Parser)]
#[command(name = "bimfetch")]
#[command(about = "bimfetch: resolve and fetch IFC / Fragments models for a BIM viewer", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

/// Where the session's model list comes from.
#[derive(Debug, Clone, Args)]
pub struct SessionArgs {
    /// Config file (TOML, or JSON by extension). Defaults to ~/.config/bimfetch/config.toml.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Viewer query string, e.g. "model=a.ifc,b.frag&ifc=c.ifc".
    #[arg(long, value_name = "QUERY", conflicts_with = "page_url")]
    pub query: Option<String>,

    /// Full viewer page URL; its query string is used.
    #[arg(long, value_name = "URL")]
    pub page_url: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Print the models a viewer session would load.
    Resolve {
        #[command(flatten)]
        session: SessionArgs,

        /// Print as JSON instead of one line per model.
        #[arg(long)]
        json: bool,
    },

    /// Resolve the session's models and fetch them into a directory.
    Fetch {
        #[command(flatten)]
        session: SessionArgs,

        /// Output directory (default: current directory).
        #[arg(long, value_name = "DIR")]
        out: Option<PathBuf>,

        /// Base URL for relative model URLs (overrides [fetch].base_url).
        #[arg(long, value_name = "URL")]
        base_url: Option<String>,
    },

    /// Print the display name derived from a model URL.
    Name {
        /// Model URL.
        url: String,
    },

    /// Generate shell completions.
    Completions {
        /// Target shell.
        shell: Shell,
    },

    /// Print the man page (roff) to stdout.
    Man,
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();

        match cli.command {
            CliCommand::Resolve { session, json } => run_resolve(&session, json)?,
            CliCommand::Fetch {
                session,
                out,
                base_url,
            } => {
                let out = match out {
                    Some(dir) => dir,
                    None => std::env::current_dir()?,
                };
                run_fetch(&session, &out, base_url.as_deref()).await?;
            }
            CliCommand::Name { url } => run_name(&url),
            CliCommand::Completions { shell } => {
                let mut cmd = Cli::command();
                clap_complete::generate(shell, &mut cmd, "bimfetch", &mut std::io::stdout());
            }
            CliCommand::Man => {
                let man = clap_mangen::Man::new(Cli::command());
                man.render(&mut std::io::stdout())?;
            }
        }

        Ok(())
    }
}
