//! # Verse Harness CLI (`vh`)
//!
//! The `vh` binary drives the corpus build. It provides commands for
//! checking configured inputs and running the chunking pipeline.
//!
//! ## Usage
//!
//! ```bash
//! vh --config ./config/vh.toml <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `vh sources` | List configured bible versions and the article index with health status |
//! | `vh build` | Chunk every configured source and write the JSONL corpus |
//!
//! ## Examples
//!
//! ```bash
//! # Check the configured inputs
//! vh sources --config ./config/vh.toml
//!
//! # Count chunks without writing anything
//! vh build --dry-run --config ./config/vh.toml
//!
//! # Build to the configured output path
//! vh build --config ./config/vh.toml
//!
//! # Build to an explicit file
//! vh build --output ./build/data.jsonl --config ./config/vh.toml
//! ```

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use verse_harness::{config, pipeline, sources};

/// Verse Harness — turn bible translations and markdown articles into an
/// embedding-ready JSONL corpus.
///
/// All commands accept a `--config` flag pointing to a TOML configuration
/// file. See `config/vh.example.toml` for a full example.
#[derive(Parser)]
#[command(
    name = "vh",
    about = "Verse Harness — chunk bible translations and markdown articles into a JSONL corpus",
    version,
    long_about = "Verse Harness loads bible versions (one JSON file per book) and a markdown \
    article corpus, splits them into bounded-size overlapping chunks with provenance metadata, \
    and writes the result as JSON Lines for downstream embedding and indexing."
)]
struct Cli {
    /// Path to configuration file (TOML).
    ///
    /// Defaults to `./config/vh.toml`. All chunking, data, and output
    /// settings are read from this file.
    #[arg(long, global = true, default_value = "./config/vh.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand)]
enum Commands {
    /// List configured inputs and their status.
    ///
    /// Shows each bible version directory and the article index file,
    /// with a health column. Useful for verifying configuration before
    /// running a build.
    Sources,

    /// Run the chunking pipeline and write the JSONL corpus.
    ///
    /// Loads every configured bible version and the article corpus,
    /// chunks them, stamps each chunk with a run-scoped build id, and
    /// writes one JSON object per line.
    Build {
        /// Write the corpus to this file instead of `[output].path`.
        #[arg(long)]
        output: Option<PathBuf>,

        /// Compute and print chunk counts without writing anything.
        #[arg(long)]
        dry_run: bool,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let cfg = config::load_config(&cli.config)?;

    match cli.command {
        Commands::Sources => {
            sources::list_sources(&cfg)?;
        }
        Commands::Build { output, dry_run } => {
            pipeline::run_build(&cfg, output.as_deref(), dry_run)?;
        }
    }

    Ok(())
}
