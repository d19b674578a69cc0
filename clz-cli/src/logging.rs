//! Logger setup: `log` records go to stderr through `env_logger`.

use std::io::Write;

use log::{Level, LevelFilter};
use owo_colors::OwoColorize;
use owo_colors::Stream::Stderr;

/// Level for the given flags. `--quiet` wins over `--verbose`.
pub(crate) fn level_for(quiet: bool, verbose: bool) -> LevelFilter {
    if quiet {
        LevelFilter::Warn
    } else if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    }
}

/// Install the global logger. `RUST_LOG` overrides the flag-derived level.
///
/// Info lines are printed bare since they are the normal user-facing output;
/// warnings and errors get a colored prefix. Verbose mode adds timestamps
/// and module targets.
pub(crate) fn init(quiet: bool, verbose: bool) {
    let mut builder = env_logger::Builder::new();
    builder.filter_level(level_for(quiet, verbose));
    builder.parse_default_env();

    if verbose {
        builder.format_timestamp_millis().format_target(true);
    } else {
        builder.format(|buf, record| match record.level() {
            Level::Error => writeln!(
                buf,
                "{} {}",
                "error:".if_supports_color(Stderr, |t| t.red()),
                record.args()
            ),
            Level::Warn => writeln!(
                buf,
                "{} {}",
                "warning:".if_supports_color(Stderr, |t| t.yellow()),
                record.args()
            ),
            _ => writeln!(buf, "{}", record.args()),
        });
    }

    // A logger can only be installed once per process.
    if let Err(e) = builder.try_init() {
        eprintln!("Failed to initialize logging: {e}");
    }
}
