use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::IgdbError;

pub const DEFAULT_AUTH_BASE_URL: &str = "https://id.twitch.tv";
pub const DEFAULT_AUTH_PATH: &str = "/oauth2/token";
pub const DEFAULT_BASE_URL: &str = "https://api.igdb.com/v4";
/// Pacing interval used when none is configured or the value is unusable.
pub const DEFAULT_RATE_LIMIT: Duration = Duration::from_millis(500);

const ENV_AUTH_BASE_URL: &str = "IGDB_AUTH_BASE_URL";
const ENV_AUTH_PATH: &str = "IGDB_AUTH_PATH";
const ENV_CLIENT_ID: &str = "IGDB_CLIENT_ID";
const ENV_CLIENT_SECRET: &str = "IGDB_CLIENT_SECRET";
const ENV_BASE_URL: &str = "IGDB_BASE_URL";
const ENV_RATE_LIMIT: &str = "IGDB_API_RATE_LIMIT";

/// Everything needed to authenticate against Twitch and query IGDB.
#[derive(Debug, Clone)]
pub struct IgdbConfig {
    pub auth_base_url: String,
    pub auth_path: String,
    pub client_id: String,
    pub client_secret: String,
    pub base_url: String,
    /// Delay between successive catalog requests.
    pub rate_limit: Duration,
}

impl IgdbConfig {
    /// Load the config from the process environment, an optional env file,
    /// and the TOML config file, in that priority order.
    ///
    /// Required: client id and client secret.
    pub fn load(env_file: Option<&Path>) -> Result<Self, IgdbError> {
        ConfigLayers::load(env_file)?.resolve()
    }
}

/// Where a config value came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Process environment variable.
    EnvVar(&'static str),
    /// `KEY=VALUE` file given on the command line.
    EnvFile(&'static str),
    /// The TOML config file.
    ConfigFile,
    /// Built-in default value.
    Default,
    /// Not set anywhere.
    Missing,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EnvVar(var) => write!(f, "env ${}", var),
            Self::EnvFile(var) => write!(f, "env file {}", var),
            Self::ConfigFile => write!(f, "config file"),
            Self::Default => write!(f, "default"),
            Self::Missing => write!(f, "not set"),
        }
    }
}

/// Provenance of each config field, for `config show`.
#[derive(Debug)]
pub struct ConfigSources {
    pub auth_base_url: ConfigSource,
    pub auth_path: ConfigSource,
    pub client_id: ConfigSource,
    pub client_secret: ConfigSource,
    pub base_url: ConfigSource,
    pub rate_limit: ConfigSource,
}

/// One config field as shown by `config show`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigField {
    pub name: &'static str,
    pub value: Option<String>,
    pub source: ConfigSource,
    /// Mask the value when displaying it.
    pub secret: bool,
}

/// TOML config file format.
#[derive(Debug, Default, serde::Deserialize, serde::Serialize)]
struct ConfigFile {
    igdb: Option<IgdbSection>,
}

#[derive(Debug, Default, Clone, serde::Deserialize, serde::Serialize)]
struct IgdbSection {
    auth_base_url: Option<String>,
    auth_path: Option<String>,
    client_id: Option<String>,
    client_secret: Option<String>,
    base_url: Option<String>,
    rate_limit_ms: Option<u64>,
}

/// The three config layers, captured once so resolution is repeatable.
#[derive(Debug, Default)]
pub struct ConfigLayers {
    env: HashMap<String, String>,
    env_file: HashMap<String, String>,
    file: IgdbSection,
}

impl ConfigLayers {
    /// Capture the process environment, the env file (if any) and the config file.
    pub fn load(env_file: Option<&Path>) -> Result<Self, IgdbError> {
        let env_file = match env_file {
            Some(path) => load_env_file(path)?,
            None => HashMap::new(),
        };
        Ok(Self {
            env: std::env::vars().collect(),
            env_file,
            file: load_config_file().unwrap_or_default(),
        })
    }

    /// Build layers from explicit parts instead of the real environment.
    pub fn from_parts(
        env: HashMap<String, String>,
        env_file: HashMap<String, String>,
        config_toml: Option<&str>,
    ) -> Result<Self, IgdbError> {
        let file = match config_toml {
            Some(text) => parse_config_file(text)?,
            None => IgdbSection::default(),
        };
        Ok(Self {
            env,
            env_file,
            file,
        })
    }

    /// Resolve the final config. Fails only if the client credentials are missing.
    pub fn resolve(&self) -> Result<IgdbConfig, IgdbError> {
        let client_id = self
            .string(ENV_CLIENT_ID, &self.file.client_id)
            .map(|(v, _)| v)
            .ok_or_else(|| {
                IgdbError::config(format!(
                    "Missing client id. Set {ENV_CLIENT_ID} or add client_id to the config file"
                ))
            })?;
        let client_secret = self
            .string(ENV_CLIENT_SECRET, &self.file.client_secret)
            .map(|(v, _)| v)
            .ok_or_else(|| {
                IgdbError::config(format!(
                    "Missing client secret. Set {ENV_CLIENT_SECRET} or add client_secret to the config file"
                ))
            })?;

        Ok(IgdbConfig {
            auth_base_url: self
                .string(ENV_AUTH_BASE_URL, &self.file.auth_base_url)
                .map(|(v, _)| v)
                .unwrap_or_else(|| DEFAULT_AUTH_BASE_URL.to_string()),
            auth_path: self
                .string(ENV_AUTH_PATH, &self.file.auth_path)
                .map(|(v, _)| v)
                .unwrap_or_else(|| DEFAULT_AUTH_PATH.to_string()),
            client_id,
            client_secret,
            base_url: self
                .string(ENV_BASE_URL, &self.file.base_url)
                .map(|(v, _)| v)
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            rate_limit: self.rate_limit(),
        })
    }

    /// Determine where each field is coming from.
    pub fn sources(&self) -> ConfigSources {
        let source = |var: &'static str, file: &Option<String>, default: bool| {
            self.string(var, file)
                .map(|(_, s)| s)
                .unwrap_or(if default {
                    ConfigSource::Default
                } else {
                    ConfigSource::Missing
                })
        };
        let rate_file = self.file.rate_limit_ms.map(|ms| ms.to_string());

        ConfigSources {
            auth_base_url: source(ENV_AUTH_BASE_URL, &self.file.auth_base_url, true),
            auth_path: source(ENV_AUTH_PATH, &self.file.auth_path, true),
            client_id: source(ENV_CLIENT_ID, &self.file.client_id, false),
            client_secret: source(ENV_CLIENT_SECRET, &self.file.client_secret, false),
            base_url: source(ENV_BASE_URL, &self.file.base_url, true),
            rate_limit: source(ENV_RATE_LIMIT, &rate_file, true),
        }
    }

    /// Every field with its effective value and source, for display.
    ///
    /// Unlike [`resolve`](Self::resolve) this never fails; missing
    /// credentials come back with no value.
    pub fn fields(&self) -> Vec<ConfigField> {
        let sources = self.sources();
        let value = |var: &'static str, file: &Option<String>, default: &str| {
            self.string(var, file)
                .map(|(v, _)| v)
                .or_else(|| (!default.is_empty()).then(|| default.to_string()))
        };
        let field = |name, value, source, secret| ConfigField {
            name,
            value,
            source,
            secret,
        };

        vec![
            field(
                "auth_base_url",
                value(ENV_AUTH_BASE_URL, &self.file.auth_base_url, DEFAULT_AUTH_BASE_URL),
                sources.auth_base_url,
                false,
            ),
            field(
                "auth_path",
                value(ENV_AUTH_PATH, &self.file.auth_path, DEFAULT_AUTH_PATH),
                sources.auth_path,
                false,
            ),
            field(
                "client_id",
                value(ENV_CLIENT_ID, &self.file.client_id, ""),
                sources.client_id,
                false,
            ),
            field(
                "client_secret",
                value(ENV_CLIENT_SECRET, &self.file.client_secret, ""),
                sources.client_secret,
                true,
            ),
            field(
                "base_url",
                value(ENV_BASE_URL, &self.file.base_url, DEFAULT_BASE_URL),
                sources.base_url,
                false,
            ),
            field(
                "rate_limit",
                Some(format!("{} ms", self.rate_limit().as_millis())),
                sources.rate_limit,
                false,
            ),
        ]
    }

    fn rate_limit(&self) -> Duration {
        if let Some((raw, _)) = self.string(ENV_RATE_LIMIT, &None) {
            return parse_rate_limit(Some(&raw));
        }
        match self.file.rate_limit_ms {
            Some(ms) => Duration::from_millis(ms),
            None => DEFAULT_RATE_LIMIT,
        }
    }

    /// First non-empty value for a field: env var, env file, then config file.
    fn string(&self, var: &'static str, file: &Option<String>) -> Option<(String, ConfigSource)> {
        let non_empty = |v: &String| !v.trim().is_empty();
        self.env
            .get(var)
            .filter(|v| non_empty(v))
            .map(|v| (v.clone(), ConfigSource::EnvVar(var)))
            .or_else(|| {
                self.env_file
                    .get(var)
                    .filter(|v| non_empty(v))
                    .map(|v| (v.clone(), ConfigSource::EnvFile(var)))
            })
            .or_else(|| {
                file.as_ref()
                    .filter(|v| non_empty(v))
                    .map(|v| (v.clone(), ConfigSource::ConfigFile))
            })
    }
}

/// Parse the rate limit in milliseconds, falling back to `DEFAULT_RATE_LIMIT`.
pub fn parse_rate_limit(raw: Option<&str>) -> Duration {
    match raw.map(str::trim) {
        None | Some("") => DEFAULT_RATE_LIMIT,
        Some(value) => match value.parse::<u64>() {
            Ok(ms) => Duration::from_millis(ms),
            Err(e) => {
                log::warn!(
                    "Invalid {ENV_RATE_LIMIT} value '{value}': {e}; using {} ms",
                    DEFAULT_RATE_LIMIT.as_millis()
                );
                DEFAULT_RATE_LIMIT
            }
        },
    }
}

/// Parse `KEY=VALUE` lines. Surrounding double quotes are stripped from values;
/// blank lines, `#` comments and lines without `=` are skipped.
pub fn parse_env_file(content: &str) -> HashMap<String, String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| line.split_once('='))
        .map(|(key, value)| {
            let value = value.trim().trim_matches('"');
            (key.trim().to_string(), value.to_string())
        })
        .filter(|(key, _)| !key.is_empty())
        .collect()
}

/// Read and parse an env file.
pub fn load_env_file(path: &Path) -> Result<HashMap<String, String>, IgdbError> {
    let content = std::fs::read_to_string(path)?;
    Ok(parse_env_file(&content))
}

/// Return the path to the TOML config file.
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("clz-translate").join("config.toml"))
}

fn parse_config_file(text: &str) -> Result<IgdbSection, IgdbError> {
    let config: ConfigFile = toml::from_str(text)
        .map_err(|e| IgdbError::config(format!("Failed to parse config file: {e}")))?;
    Ok(config.igdb.unwrap_or_default())
}

fn load_config_file() -> Option<IgdbSection> {
    let path = config_path()?;
    let content = std::fs::read_to_string(&path).ok()?;
    match parse_config_file(&content) {
        Ok(section) => Some(section),
        Err(e) => {
            log::warn!("Ignoring {}: {}", path.display(), e);
            None
        }
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
