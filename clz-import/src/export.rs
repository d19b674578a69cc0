use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use chrono::{DateTime, NaiveDate, Utc};
use clz_core::{CollectionEntry, Link};
use quick_xml::events::Event;
use quick_xml::reader::Reader;

use crate::error::ImportError;

/// Parse a CLZ export from a file on disk.
pub fn parse_export_file(path: &Path) -> Result<Vec<CollectionEntry>, ImportError> {
    let file = File::open(path)?;
    let games = parse_export(BufReader::new(file))?;
    log::debug!("Read {} games from {}", games.len(), path.display());
    Ok(games)
}

/// Parse a CLZ export held in memory.
pub fn parse_export_str(xml: &str) -> Result<Vec<CollectionEntry>, ImportError> {
    parse_export(xml.as_bytes())
}

/// Parse a CLZ Games XML export.
///
/// Every `<game>` element becomes one entry, in document order. The root
/// element name is not checked and unknown elements are skipped, so exports
/// from newer CLZ versions still load.
pub fn parse_export<R: BufRead>(reader: R) -> Result<Vec<CollectionEntry>, ImportError> {
    let mut xml = Reader::from_reader(reader);
    xml.config_mut().trim_text(true);

    let mut buf = Vec::new();
    let mut games = Vec::new();

    // Open elements, outermost first.
    let mut path: Vec<String> = Vec::new();
    let mut text = String::new();
    let mut saw_root = false;

    // Current game and the depth of its <game> element.
    let mut current: Option<(CollectionEntry, usize)> = None;

    loop {
        match xml.read_event_into(&mut buf)? {
            Event::Start(ref e) => {
                let tag = String::from_utf8_lossy(e.name().as_ref()).to_string();
                saw_root = true;
                text.clear();

                if let Some((game, depth)) = &mut current {
                    if field_path(&path, *depth, &tag) == "links/link" {
                        game.links.push(Link::default());
                    }
                } else if tag == "game" {
                    current = Some((CollectionEntry::default(), path.len()));
                }
                path.push(tag);
            }
            Event::Empty(ref e) => {
                saw_root = true;
                // <game/> is an entry with no fields at all.
                if current.is_none() && e.name().as_ref() == b"game" {
                    games.push(CollectionEntry::default());
                }
            }
            Event::Text(ref e) => text.push_str(&e.unescape()?),
            Event::CData(e) => text.push_str(&String::from_utf8_lossy(&e.into_inner())),
            Event::End(_) => {
                let Some(tag) = path.pop() else {
                    return Err(ImportError::invalid_export("unbalanced closing tag"));
                };

                if let Some((game, depth)) = &mut current
                    && path.len() > *depth
                {
                    apply_field(game, &field_path(&path, *depth, &tag), text.trim());
                }
                if current.as_ref().is_some_and(|(_, depth)| path.len() == *depth)
                    && let Some((mut game, _)) = current.take()
                {
                    game.completeness.has_game = game.quantity > 0;
                    games.push(game);
                }
                text.clear();
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    if let Some(open) = path.last() {
        return Err(ImportError::invalid_export(format!(
            "document ends inside <{open}>"
        )));
    }
    if !saw_root {
        return Err(ImportError::invalid_export("no root element"));
    }
    if games.is_empty() {
        log::warn!("Export contains no <game> elements");
    }

    Ok(games)
}

/// Path of `tag` relative to the enclosing `<game>`, e.g. `platform/displayname`.
fn field_path(path: &[String], game_depth: usize, tag: &str) -> String {
    let mut parts: Vec<&str> = path[game_depth + 1..].iter().map(String::as_str).collect();
    parts.push(tag);
    parts.join("/")
}

fn apply_field(game: &mut CollectionEntry, field: &str, value: &str) {
    if value.is_empty() {
        return;
    }

    match field {
        "title" => game.title = value.to_string(),
        "platform/displayname" => game.platform = value.to_string(),
        "condition" => game.condition = value.to_string(),
        "quantity" => {
            game.quantity = value.parse().unwrap_or_else(|_| {
                log::warn!("Invalid quantity '{value}' for '{}', using 0", game.title);
                0
            });
        }
        "publishers/publisher/displayname" => game.publishers.push(value.to_string()),
        "developers/developer/displayname" => game.developers.push(value.to_string()),
        "genres/genre/displayname" => game.genres.push(value.to_string()),
        "dateadded/date" | "dateadded/date/timestamp" => game.date_acquired = parse_date(value),
        "releasedate/date" | "releasedate/date/timestamp" => {
            game.release_date = parse_date(value)
        }
        "gameshardware/displayname" => game.hardware_type = value.to_string(),
        "region/displayname" => game.region = value.to_string(),
        "multiplayer" => game.multiplayer = is_true(value),
        "format/displayname" => game.format = value.to_string(),
        "edition/displayname" => game.edition = value.to_string(),
        "boxset" => game.boxset = is_true(value),
        "hasbox" => game.completeness.has_box = is_true(value),
        "hasmanual" => game.completeness.has_manual = is_true(value),
        "pricechartingvalue" => {
            game.pricecharting_value = value.parse().unwrap_or_else(|_| {
                log::warn!("Invalid price '{value}' for '{}', using 0", game.title);
                0.0
            });
        }
        "links/link/description" => {
            if let Some(link) = game.links.last_mut() {
                link.description = value.to_string();
            }
        }
        "links/link/url" => {
            if let Some(link) = game.links.last_mut() {
                link.url = value.to_string();
            }
        }
        _ => {}
    }
}

fn is_true(value: &str) -> bool {
    value == "true"
}

/// Parse an export date: unix seconds, `YYYY-MM-DD`, or RFC 3339.
///
/// Zero and unparseable values yield `None`.
pub fn parse_date(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(secs) = value.parse::<i64>() {
        return if secs == 0 {
            None
        } else {
            DateTime::from_timestamp(secs, 0)
        };
    }
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc());
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }

    log::warn!("Unrecognized date '{value}'");
    None
}
