use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::platform::{Platform, PlatformNameMap};

/// Catalog identifier value meaning "not resolved". IGDB never issues it.
pub const UNRESOLVED_ID: u64 = 0;

/// The translated collection, as written to the output JSON file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GameCollection {
    pub games: Vec<CollectionEntry>,
}

impl GameCollection {
    pub fn new(games: Vec<CollectionEntry>) -> Self {
        Self { games }
    }

    pub fn len(&self) -> usize {
        self.games.len()
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }
}

/// A single game from the collection export.
///
/// The export fields are filled once by the importer. `igdb_id` is written by
/// the resolver, and the enrichment fields (`first_release_date`,
/// `storyline`, `summary`, `cover`) only by reconciliation. Their default
/// values mean "not enriched" and say nothing about the catalog's data for
/// entries that were never looked up.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CollectionEntry {
    pub title: String,
    /// Platform display name as exported (e.g. "PlayStation").
    pub platform: String,
    /// IGDB game id, or `UNRESOLVED_ID`.
    pub igdb_id: u64,

    pub first_release_date: Option<DateTime<Utc>>,
    pub storyline: String,
    pub summary: String,
    pub cover: Cover,

    pub boxset: bool,
    pub completeness: Completeness,
    pub condition: String,
    pub date_acquired: Option<DateTime<Utc>>,
    pub developers: Vec<String>,
    pub edition: String,
    pub format: String,
    pub genres: Vec<String>,
    pub hardware_type: String,
    pub links: Vec<Link>,
    pub multiplayer: bool,
    pub pricecharting_value: f64,
    pub publishers: Vec<String>,
    pub quantity: u32,
    pub region: String,
    /// Release date from the export itself.
    pub release_date: Option<DateTime<Utc>>,
    pub series: String,
}

impl CollectionEntry {
    /// Minimal entry with just the fields the enrichment pipeline reads.
    pub fn new(title: impl Into<String>, platform: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            platform: platform.into(),
            ..Default::default()
        }
    }

    pub fn is_resolved(&self) -> bool {
        self.igdb_id != UNRESOLVED_ID
    }

    /// The known platform, if the exported name maps to one.
    pub fn known_platform(&self) -> Option<Platform> {
        self.platform.parse().ok()
    }

    /// IGDB platform id for this entry's platform.
    pub fn igdb_platform_id(&self) -> Option<u64> {
        PlatformNameMap::standard().igdb_id(&self.platform)
    }

    /// Whether any enrichment field holds data.
    pub fn has_enrichment(&self) -> bool {
        self.first_release_date.is_some()
            || !self.storyline.is_empty()
            || !self.summary.is_empty()
            || self.cover != Cover::default()
    }
}

/// Cover art descriptor from the catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cover {
    pub id: u64,
    pub width: u32,
    pub url: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Completeness {
    pub has_box: bool,
    pub has_manual: bool,
    pub has_game: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub description: String,
    pub url: String,
}
