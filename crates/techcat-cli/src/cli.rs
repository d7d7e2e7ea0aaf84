use std::path::PathBuf;

use clap::{Parser, Subcommand};
use techcat_resolution::Stage;

/// Resolve raw technology mentions into a deduplicated canonical catalog.
#[derive(Debug, Parser)]
#[command(name = "techcat", version, about)]
pub struct Cli {
    /// TOML configuration file. Defaults apply when omitted.
    #[arg(long, short, global = true, env = "TECHCAT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Override the configured artifact directory.
    #[arg(long, global = true)]
    pub artifact_dir: Option<PathBuf>,

    /// Emit logs as JSON lines.
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run every stage from raw mentions.
    Run {
        /// JSON array of raw mention records.
        #[arg(long)]
        mentions: PathBuf,
        /// Existing canonical catalog (JSON list of entries).
        #[arg(long)]
        catalog: Option<PathBuf>,
    },
    /// Resume at a stage from the checkpoint artifacts of a previous run.
    Resume {
        #[arg(long, value_parser = parse_stage)]
        stage: Stage,
        /// Existing canonical catalog used by the original run.
        #[arg(long)]
        catalog: Option<PathBuf>,
    },
    /// Re-validate a catalog file without running the pipeline.
    Validate {
        #[arg(long)]
        catalog_file: PathBuf,
        /// Raw mentions the catalog was built from; sets the coverage baseline.
        #[arg(long)]
        mentions: Option<PathBuf>,
    },
}

fn parse_stage(s: &str) -> Result<Stage, String> {
    s.parse()
}
