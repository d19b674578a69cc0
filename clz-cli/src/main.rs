//! clz-translate CLI
//!
//! Converts CLZ Games XML exports into JSON game collections, optionally
//! enriched with IGDB metadata.

mod cli_types;
mod commands;
mod error;
mod logging;

use clap::Parser;

use cli_types::{Cli, Commands, ConfigAction};

fn main() {
    let cli = Cli::parse();
    logging::init(cli.quiet, cli.verbose);

    let result = match cli.command {
        Commands::Translate(args) => commands::translate::run_translate(&args, cli.quiet),
        Commands::Config { action } => match action {
            ConfigAction::Show { env_file } => {
                commands::config::run_config_show(env_file.as_deref())
            }
            ConfigAction::Path => commands::config::run_config_path(),
        },
    };

    if let Err(e) = result {
        log::error!("{e}");
        std::process::exit(1);
    }
}
