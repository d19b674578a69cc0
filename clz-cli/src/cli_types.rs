//! CLI type definitions: command enums and argument structs.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "clz-translate")]
#[command(about = "Translate CLZ Games exports to JSON, with optional IGDB enrichment", long_about = None)]
pub(crate) struct Cli {
    /// Only show warnings and errors (suppress normal output)
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Enable verbose/debug logging (timestamps + debug-level messages)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Translate a CLZ XML export into a JSON game collection
    Translate(TranslateArgs),

    /// Inspect IGDB configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Args, Clone, Debug)]
pub(crate) struct TranslateArgs {
    /// CLZ XML export to read
    #[arg(short, long)]
    pub seed_file: PathBuf,

    /// Write the collection to <NAME>.json instead of printing it
    #[arg(short, long, value_name = "NAME")]
    pub write_file_name: Option<String>,

    /// Look up every game on IGDB and add cover, summary and release date
    #[arg(long)]
    pub igdb: bool,

    /// KEY=VALUE file with IGDB settings (e.g. .env.local)
    #[arg(long)]
    pub env_file: Option<PathBuf>,

    /// Games per IGDB detail request
    #[arg(long, default_value_t = clz_igdb::BATCH_SIZE)]
    pub batch_size: usize,
}

#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Show the effective IGDB settings and where each one comes from
    Show {
        /// KEY=VALUE file to include, as `translate --env-file` would
        #[arg(long)]
        env_file: Option<PathBuf>,
    },

    /// Print the config file path
    Path,
}
