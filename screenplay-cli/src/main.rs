//! # screenplay CLI
//!
//! Command-line tools for the structured event streams written by the
//! screenplay engine when structured logging is enabled.

mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "screenplay")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Pretty-print event lines, passing other output through
    Render {
        /// Input file (defaults to stdin)
        file: Option<PathBuf>,

        /// Colorize output
        #[arg(long, env = "SCREENPLAY_COLOR")]
        color: bool,
    },

    /// Count events and report failures that were not skipped
    Summary {
        /// Input file (defaults to stdin)
        file: Option<PathBuf>,

        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let subscriber = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(if cli.verbose {
                tracing::Level::DEBUG.into()
            } else {
                tracing::Level::WARN.into()
            }),
        )
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Render { file, color } => commands::render_events(file.as_deref(), color),
        Commands::Summary { file, json } => commands::summarize_events(file.as_deref(), json),
    }
}
