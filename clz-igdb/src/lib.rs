//! IGDB enrichment for translated CLZ collections.
//!
//! Titles are resolved to IGDB ids by search, the ids are fetched in small
//! paced batches, and the returned records are reconciled into the entries by
//! id. Every step is fail-soft: a run never loses or reorders entries.

pub mod auth;
pub mod batch;
pub mod client;
pub mod config;
pub mod enrich;
pub mod error;
pub mod fetch;
pub mod normalize;
pub mod pacer;
pub mod reconcile;
pub mod resolve;
pub mod types;

pub use batch::{BATCH_SIZE, plan, plan_batches};
pub use client::{CatalogApi, IgdbClient};
pub use config::{ConfigField, ConfigLayers, ConfigSource, ConfigSources, IgdbConfig, config_path};
pub use enrich::{EnrichEvent, EnrichOptions, EnrichStats, enrich_collection};
pub use error::IgdbError;
pub use normalize::normalize_title;
pub use pacer::Pacer;
pub use reconcile::ReconcileOutcome;
pub use resolve::{MatchMethod, Resolution, ResolveStats, resolve, resolve_collection};
pub use types::{CoverRef, DetailRecord, PlatformRef, SearchCandidate};
