use serde::{Deserialize, Deserializer};

/// Response body of the client-credentials token exchange.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub expires_in: u64,
    #[serde(default)]
    pub token_type: String,
}

/// A game returned by a `search` query (`fields id, name, platforms;`).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SearchCandidate {
    pub id: u64,
    #[serde(default)]
    pub name: String,
    /// IGDB platform ids, not CLZ names.
    #[serde(default, deserialize_with = "null_as_default")]
    pub platforms: Vec<u64>,
}

/// A game returned by a detail query by id.
///
/// Only `id` is required; IGDB omits fields it has no data for.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct DetailRecord {
    pub id: u64,
    #[serde(default)]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub platforms: Vec<PlatformRef>,
    /// Seconds since the Unix epoch; 0 when unknown.
    #[serde(default)]
    pub first_release_date: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub storyline: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub summary: String,
    #[serde(default)]
    pub cover: Option<CoverRef>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub artworks: Vec<u64>,
    #[serde(default)]
    pub franchise: Option<u64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub genres: Vec<u64>,
    #[serde(default)]
    pub game_status: Option<u64>,
    #[serde(default)]
    pub game_type: Option<u64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub videos: Vec<u64>,
}

/// A platform reference: either a bare id or an expanded `{id, name}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "PlatformWire")]
pub struct PlatformRef {
    pub id: u64,
    pub name: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PlatformWire {
    Id(u64),
    Expanded {
        id: u64,
        #[serde(default)]
        name: String,
    },
}

impl From<PlatformWire> for PlatformRef {
    fn from(wire: PlatformWire) -> Self {
        match wire {
            PlatformWire::Id(id) => Self {
                id,
                name: String::new(),
            },
            PlatformWire::Expanded { id, name } => Self { id, name },
        }
    }
}

/// A cover reference: either a bare id or an expanded `{id, width, url}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "CoverWire")]
pub struct CoverRef {
    pub id: u64,
    pub width: u32,
    pub url: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum CoverWire {
    Id(u64),
    Expanded {
        id: u64,
        #[serde(default)]
        width: u32,
        #[serde(default)]
        url: String,
    },
}

impl From<CoverWire> for CoverRef {
    fn from(wire: CoverWire) -> Self {
        match wire {
            CoverWire::Id(id) => Self {
                id,
                ..Default::default()
            },
            CoverWire::Expanded { id, width, url } => Self { id, width, url },
        }
    }
}

/// IGDB sends `null` for some empty fields; treat it like an absent field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
