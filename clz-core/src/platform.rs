use std::collections::HashMap;
use std::sync::LazyLock;

/// Platforms known to both the CLZ export and the IGDB catalog.
///
/// CLZ and IGDB name the same hardware differently (e.g. "Genesis / Mega Drive"
/// vs. "Sega Mega Drive/Genesis"), and IGDB search results only carry numeric
/// platform identifiers. This enum is the single table tying the three
/// together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    // Atari
    Atari2600,

    // Nintendo
    Famicom,
    SuperFamicom,
    Nes,
    Snes,
    N64,
    Wii,
    Switch,
    GameBoy,
    Gba,

    // Sega
    Saturn,
    Dreamcast,
    Genesis,
    GameGear,

    // Sony
    Ps1,
    Ps2,
    Ps3,
    Ps4,
    Ps5,
    Vita,
    Psp,

    // Microsoft
    Xbox360,
}

/// All platform variants in registration order.
const ALL_PLATFORMS: &[Platform] = &[
    Platform::Atari2600,
    Platform::Famicom,
    Platform::SuperFamicom,
    Platform::Nes,
    Platform::Snes,
    Platform::N64,
    Platform::Wii,
    Platform::Switch,
    Platform::GameBoy,
    Platform::Gba,
    Platform::Saturn,
    Platform::Dreamcast,
    Platform::Genesis,
    Platform::GameGear,
    Platform::Ps1,
    Platform::Ps2,
    Platform::Ps3,
    Platform::Ps4,
    Platform::Ps5,
    Platform::Vita,
    Platform::Psp,
    Platform::Xbox360,
];

impl Platform {
    /// Display name as it appears in `<platform><displayname>` of a CLZ export.
    pub fn clz_name(&self) -> &'static str {
        match self {
            Self::Atari2600 => "Atari 2600/VCS",
            Self::Famicom => "Family Computer / Famicom",
            Self::SuperFamicom => "Super Famicom",
            Self::Nes => "NES",
            Self::Snes => "SNES",
            Self::N64 => "Nintendo 64",
            Self::Wii => "Wii",
            Self::Switch => "Nintendo Switch",
            Self::GameBoy => "Game Boy",
            Self::Gba => "Game Boy Advance",
            Self::Saturn => "Saturn",
            Self::Dreamcast => "Dreamcast",
            Self::Genesis => "Genesis / Mega Drive",
            Self::GameGear => "Game Gear",
            Self::Ps1 => "PlayStation",
            Self::Ps2 => "PlayStation 2",
            Self::Ps3 => "PlayStation 3",
            Self::Ps4 => "PlayStation 4",
            Self::Ps5 => "PlayStation 5",
            Self::Vita => "PlayStation Vita",
            Self::Psp => "PSP",
            Self::Xbox360 => "Xbox 360",
        }
    }

    /// IGDB's numeric platform identifier.
    pub fn igdb_id(&self) -> u64 {
        match self {
            Self::Atari2600 => 59,
            Self::Famicom => 99,
            Self::SuperFamicom => 58,
            Self::Nes => 18,
            Self::Snes => 19,
            Self::N64 => 4,
            Self::Wii => 5,
            Self::Switch => 130,
            Self::GameBoy => 33,
            Self::Gba => 24,
            Self::Saturn => 32,
            Self::Dreamcast => 23,
            Self::Genesis => 29,
            Self::GameGear => 35,
            Self::Ps1 => 7,
            Self::Ps2 => 8,
            Self::Ps3 => 9,
            Self::Ps4 => 48,
            Self::Ps5 => 167,
            Self::Vita => 46,
            Self::Psp => 38,
            Self::Xbox360 => 12,
        }
    }

    /// IGDB's display name for the platform.
    pub fn igdb_name(&self) -> &'static str {
        match self {
            Self::Atari2600 => "Atari 2600",
            Self::Famicom => "Family Computer",
            Self::SuperFamicom => "Super Famicom",
            Self::Nes => "Nintendo Entertainment System",
            Self::Snes => "Super Nintendo Entertainment System",
            Self::N64 => "Nintendo 64",
            Self::Wii => "Wii",
            Self::Switch => "Nintendo Switch",
            Self::GameBoy => "Game Boy",
            Self::Gba => "Game Boy Advance",
            Self::Saturn => "Sega Saturn",
            Self::Dreamcast => "Dreamcast",
            Self::Genesis => "Sega Mega Drive/Genesis",
            Self::GameGear => "Sega Game Gear",
            Self::Ps1 => "PlayStation",
            Self::Ps2 => "PlayStation 2",
            Self::Ps3 => "PlayStation 3",
            Self::Ps4 => "PlayStation 4",
            Self::Ps5 => "PlayStation 5",
            Self::Vita => "PlayStation Vita",
            Self::Psp => "PlayStation Portable",
            Self::Xbox360 => "Xbox 360",
        }
    }

    /// Alternative spellings accepted when parsing, all lower-case.
    ///
    /// The lower-cased CLZ name is always the first alias.
    pub fn aliases(&self) -> &'static [&'static str] {
        match self {
            Self::Atari2600 => &["atari 2600/vcs", "atari 2600", "2600", "vcs"],
            Self::Famicom => &["family computer / famicom", "famicom", "fc"],
            Self::SuperFamicom => &["super famicom", "sfc"],
            Self::Nes => &["nes", "nintendo entertainment system"],
            Self::Snes => &["snes", "super nintendo", "super nintendo entertainment system"],
            Self::N64 => &["nintendo 64", "n64"],
            Self::Wii => &["wii"],
            Self::Switch => &["nintendo switch", "switch"],
            Self::GameBoy => &["game boy", "gameboy", "gb"],
            Self::Gba => &["game boy advance", "gameboy advance", "gba"],
            Self::Saturn => &["saturn", "sega saturn"],
            Self::Dreamcast => &["dreamcast", "dc"],
            Self::Genesis => &[
                "genesis / mega drive",
                "genesis",
                "mega drive",
                "megadrive",
                "sega mega drive/genesis",
            ],
            Self::GameGear => &["game gear", "gamegear", "gg"],
            Self::Ps1 => &["playstation", "ps1", "psx"],
            Self::Ps2 => &["playstation 2", "ps2"],
            Self::Ps3 => &["playstation 3", "ps3"],
            Self::Ps4 => &["playstation 4", "ps4"],
            Self::Ps5 => &["playstation 5", "ps5"],
            Self::Vita => &["playstation vita", "vita", "psvita"],
            Self::Psp => &["psp", "playstation portable"],
            Self::Xbox360 => &["xbox 360", "xbox360", "x360"],
        }
    }

    /// All platform variants.
    pub fn all() -> &'static [Platform] {
        ALL_PLATFORMS
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.clz_name())
    }
}

/// Error returned when a string cannot be parsed into a `Platform`.
#[derive(Debug, Clone)]
pub struct PlatformParseError(pub String);

impl std::fmt::Display for PlatformParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown platform: '{}'", self.0)
    }
}

impl std::error::Error for PlatformParseError {}

impl std::str::FromStr for Platform {
    type Err = PlatformParseError;

    /// Parse a platform from any recognized name (case-insensitive).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        ALL_PLATFORMS
            .iter()
            .copied()
            .find(|p| p.aliases().contains(&lower.as_str()))
            .ok_or_else(|| PlatformParseError(s.to_string()))
    }
}

static STANDARD_MAP: LazyLock<PlatformNameMap> = LazyLock::new(|| {
    let mut clz_to_igdb = HashMap::new();
    let mut igdb_to_clz = HashMap::new();
    for &platform in ALL_PLATFORMS {
        clz_to_igdb.insert(platform.clz_name(), platform.igdb_id());
        igdb_to_clz.insert(platform.igdb_id(), platform.clz_name());
    }
    PlatformNameMap {
        clz_to_igdb,
        igdb_to_clz,
    }
});

/// Bidirectional lookup between CLZ platform names and IGDB platform ids.
///
/// Built once from the `Platform` table and never mutated.
#[derive(Debug)]
pub struct PlatformNameMap {
    clz_to_igdb: HashMap<&'static str, u64>,
    igdb_to_clz: HashMap<u64, &'static str>,
}

impl PlatformNameMap {
    /// The process-wide map.
    pub fn standard() -> &'static PlatformNameMap {
        &STANDARD_MAP
    }

    /// IGDB id for an exact CLZ display name, falling back to alias parsing.
    pub fn igdb_id(&self, clz_name: &str) -> Option<u64> {
        self.clz_to_igdb.get(clz_name).copied().or_else(|| {
            clz_name
                .parse::<Platform>()
                .ok()
                .map(|p| p.igdb_id())
        })
    }

    /// CLZ display name for an IGDB platform id.
    pub fn clz_name(&self, igdb_id: u64) -> Option<&'static str> {
        self.igdb_to_clz.get(&igdb_id).copied()
    }

    pub fn len(&self) -> usize {
        self.clz_to_igdb.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clz_to_igdb.is_empty()
    }
}

#[cfg(test)]
#[path = "tests/platform_tests.rs"]
mod tests;
