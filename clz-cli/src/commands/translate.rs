use std::path::PathBuf;

use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use clz_core::{CollectionEntry, GameCollection};
use clz_igdb::{EnrichEvent, EnrichOptions, EnrichStats, IgdbClient, IgdbConfig};

use crate::cli_types::TranslateArgs;
use crate::error::CliError;

/// Translate a CLZ export, optionally enrich it, and write or print the JSON.
pub(crate) fn run_translate(args: &TranslateArgs, quiet: bool) -> Result<(), CliError> {
    let output = match &args.write_file_name {
        Some(name) => Some(output_path(name)?),
        None => None,
    };

    log::info!(
        "Translating {}",
        args.seed_file
            .display()
            .if_supports_color(Stdout, |t| t.cyan()),
    );
    let games = clz_import::parse_export_file(&args.seed_file)?;
    log::info!("Read {} games from the export", games.len());

    let mut collection = GameCollection::new(games);
    if args.igdb {
        enrich(&mut collection.games, args, quiet);
    }

    let json = serde_json::to_string_pretty(&collection)?;
    match output {
        Some(path) => {
            std::fs::write(&path, json)?;
            log::info!(
                "{} Wrote {} games to {}",
                "\u{2714}".if_supports_color(Stdout, |t| t.green()),
                collection.len(),
                path.display().if_supports_color(Stdout, |t| t.cyan()),
            );
        }
        None => {
            log::info!("No output file name given, printing JSON");
            println!("{json}");
        }
    }
    Ok(())
}

/// `<name>.json`, as the file name the collection is written to.
fn output_path(name: &str) -> Result<PathBuf, CliError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(CliError::other("--write-file-name must not be empty"));
    }
    Ok(PathBuf::from(format!("{name}.json")))
}

/// Run IGDB enrichment. Problems are logged; the collection is always kept.
fn enrich(entries: &mut [CollectionEntry], args: &TranslateArgs, quiet: bool) {
    let config = match IgdbConfig::load(args.env_file.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            log::error!("{e}");
            log::error!("Skipping IGDB enrichment; run 'clz-translate config show' to check settings.");
            return;
        }
    };

    let client = match IgdbClient::connect(&config) {
        Ok(c) => c,
        Err(e) => {
            log::error!("Failed to create IGDB client: {e}");
            return;
        }
    };

    let options = EnrichOptions::from_config(&config).batch_size(args.batch_size);
    log::info!(
        "Looking up {} games on IGDB ({} ms between requests)",
        entries.len(),
        options.rate_limit.as_millis(),
    );

    let mut display = EnrichDisplay::new(quiet);
    let stats = clz_igdb::enrich_collection(&client, entries, &options, &mut |event| {
        display.handle(event)
    });

    print_summary(&stats);
}

/// Spinner that follows enrichment events.
struct EnrichDisplay {
    pb: ProgressBar,
    resolve_total: usize,
}

impl EnrichDisplay {
    fn new(quiet: bool) -> Self {
        let pb = if quiet {
            ProgressBar::hidden()
        } else {
            let pb = ProgressBar::new_spinner();
            pb.set_style(
                ProgressStyle::with_template("  {spinner:.cyan} {msg}")
                    .expect("static pattern")
                    .tick_chars("/-\\|"),
            );
            pb
        };
        Self {
            pb,
            resolve_total: 0,
        }
    }

    fn handle(&mut self, event: EnrichEvent) {
        match event {
            EnrichEvent::ResolveStarted { total } => {
                self.resolve_total = total;
                self.pb.set_message(format!("Searching IGDB for {total} titles"));
            }
            EnrichEvent::EntrySkipped { index } => {
                self.pb.set_message(format!(
                    "[{}/{}] Already has an IGDB id",
                    index + 1,
                    self.resolve_total
                ));
            }
            EnrichEvent::EntryResolved {
                index,
                ref title,
                igdb_id,
                method,
            } => {
                log::debug!("'{title}' -> IGDB {igdb_id} ({method})");
                self.pb.set_message(format!(
                    "[{}/{}] {}",
                    index + 1,
                    self.resolve_total,
                    title
                ));
            }
            EnrichEvent::EntryUnresolved {
                index, ref title, ..
            } => {
                self.pb.set_message(format!(
                    "[{}/{}] {} (no match)",
                    index + 1,
                    self.resolve_total,
                    title
                ));
            }
            EnrichEvent::FetchStarted { batches } => {
                self.pb
                    .set_message(format!("Fetching details in {batches} batches"));
            }
            EnrichEvent::BatchFetched {
                index,
                total,
                requested,
                returned,
            } => {
                self.pb.set_message(format!(
                    "[{}/{}] Received {returned} of {requested} games",
                    index + 1,
                    total
                ));
            }
            EnrichEvent::BatchFailed { index, total, .. } => {
                self.pb
                    .set_message(format!("[{}/{}] Batch failed", index + 1, total));
            }
            EnrichEvent::Done { .. } => {
                self.pb.finish_and_clear();
                return;
            }
        }
        self.pb.tick();
    }
}

fn print_summary(stats: &EnrichStats) {
    log::info!("");
    log::info!(
        "{} Enriched {} of {} games",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        stats.entries_enriched(),
        stats.entries,
    );
    log::info!(
        "  Matched: {} (already known: {})",
        stats.resolve.resolved,
        stats.resolve.skipped,
    );
    if stats.resolve.missed > 0 {
        log::info!(
            "  {}",
            format!("Not found on IGDB: {}", stats.resolve.missed)
                .if_supports_color(Stdout, |t| t.yellow()),
        );
    }
    if stats.resolve.failed > 0 || stats.fetch.batches_failed > 0 {
        log::warn!(
            "  {}",
            format!(
                "Failed requests: {} searches, {} of {} detail batches",
                stats.resolve.failed, stats.fetch.batches_failed, stats.fetch.batches,
            )
            .if_supports_color(Stdout, |t| t.red()),
        );
    }
    if stats.fetch.orphaned > 0 {
        log::warn!(
            "  IGDB returned {} records that matched no game",
            stats.fetch.orphaned
        );
    }
}
