use std::path::Path;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use clz_igdb::{ConfigField, ConfigLayers};

use crate::error::CliError;

fn mask_value(s: &str) -> String {
    if s.chars().count() <= 2 {
        "****".to_string()
    } else {
        let prefix: String = s.chars().take(2).collect();
        format!("{prefix}****")
    }
}

fn display_value(field: &ConfigField) -> Option<String> {
    field.value.as_deref().map(|v| {
        if field.secret {
            mask_value(v)
        } else {
            v.to_string()
        }
    })
}

/// Show the effective IGDB settings and their sources.
pub(crate) fn run_config_show(env_file: Option<&Path>) -> Result<(), CliError> {
    let path = clz_igdb::config_path();

    log::info!(
        "{}",
        "IGDB Configuration".if_supports_color(Stdout, |t| t.bold()),
    );
    log::info!("");

    match &path {
        Some(p) if p.exists() => {
            log::info!(
                "  Config file: {} {}",
                p.display().if_supports_color(Stdout, |t| t.cyan()),
                "(exists)".if_supports_color(Stdout, |t| t.green()),
            );
        }
        Some(p) => {
            log::info!(
                "  Config file: {} {}",
                p.display().if_supports_color(Stdout, |t| t.cyan()),
                "(not found)".if_supports_color(Stdout, |t| t.dimmed()),
            );
        }
        None => {
            log::info!(
                "  Config file: {}",
                "could not determine path".if_supports_color(Stdout, |t| t.red()),
            );
        }
    }
    if let Some(env_file) = env_file {
        log::info!(
            "  Env file:    {}",
            env_file.display().if_supports_color(Stdout, |t| t.cyan()),
        );
    }
    log::info!("");

    let layers = ConfigLayers::load(env_file).map_err(|e| CliError::config(e.to_string()))?;
    let fields = layers.fields();

    for field in &fields {
        let source_str = format!("({})", field.source);
        match display_value(field) {
            Some(v) => {
                log::info!(
                    "  {} {} {}",
                    format!("{}:", field.name).if_supports_color(Stdout, |t| t.cyan()),
                    v,
                    source_str.if_supports_color(Stdout, |t| t.dimmed()),
                );
            }
            None => {
                log::warn!(
                    "  {} {} {}",
                    format!("{}:", field.name).if_supports_color(Stdout, |t| t.cyan()),
                    "not set".if_supports_color(Stdout, |t| t.yellow()),
                    source_str.if_supports_color(Stdout, |t| t.dimmed()),
                );
            }
        }
    }

    if let Err(e) = layers.resolve() {
        log::info!("");
        log::warn!("{e}");
    }
    Ok(())
}

/// Print the config file path.
pub(crate) fn run_config_path() -> Result<(), CliError> {
    match clz_igdb::config_path() {
        Some(path) => {
            log::info!("{}", path.display());
            Ok(())
        }
        None => Err(CliError::config("Could not determine config directory")),
    }
}
