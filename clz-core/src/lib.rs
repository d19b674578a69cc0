//! Domain model for translated CLZ game collections.

pub mod entry;
pub mod platform;

pub use entry::{CollectionEntry, Completeness, Cover, GameCollection, Link, UNRESOLVED_ID};
pub use platform::{Platform, PlatformNameMap, PlatformParseError};
