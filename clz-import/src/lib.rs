//! Read CLZ Games XML exports into collection entries.
//!
//! The export is a flat list of `<game>` elements; every field maps one to one
//! onto [`clz_core::CollectionEntry`]. Catalog enrichment happens later, in
//! `clz-igdb`.

pub mod error;
pub mod export;

pub use error::ImportError;
pub use export::{parse_date, parse_export, parse_export_file, parse_export_str};
