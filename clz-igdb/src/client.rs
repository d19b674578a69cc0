use std::time::Duration;

use reqwest::blocking::Client;
use serde::de::DeserializeOwned;

use crate::auth::{self, AUTH_FAILED_TOKEN};
use crate::config::IgdbConfig;
use crate::error::IgdbError;
use crate::types::{DetailRecord, SearchCandidate};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// The two catalog operations the enrichment pipeline needs.
///
/// `IgdbClient` is the HTTP implementation; tests use in-memory fakes.
pub trait CatalogApi {
    /// Full detail records for the given ids. Ids IGDB doesn't know are
    /// simply absent from the result, and the order is not guaranteed.
    fn fetch_by_ids(&self, ids: &[u64]) -> Result<Vec<DetailRecord>, IgdbError>;

    /// Free-text search, in IGDB's relevance order.
    fn search_by_term(&self, term: &str) -> Result<Vec<SearchCandidate>, IgdbError>;
}

/// Blocking HTTP client for the IGDB v4 API.
pub struct IgdbClient {
    http: Client,
    base_url: String,
    client_id: String,
    token: String,
}

impl IgdbClient {
    /// Build a client and perform the credential exchange.
    ///
    /// A failed exchange is logged and replaced by `AUTH_FAILED_TOKEN`; only
    /// failing to build the HTTP client itself is returned as an error.
    pub fn connect(config: &IgdbConfig) -> Result<Self, IgdbError> {
        let http = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        let token = match auth::request_token(&http, config) {
            Ok(resp) => resp.access_token,
            Err(e) => {
                log::warn!("IGDB authentication failed: {}", e);
                AUTH_FAILED_TOKEN.to_string()
            }
        };
        Ok(Self::from_parts(http, config, token))
    }

    /// Build a client around an already obtained token.
    pub fn with_token(config: &IgdbConfig, token: impl Into<String>) -> Result<Self, IgdbError> {
        let http = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self::from_parts(http, config, token.into()))
    }

    fn from_parts(http: Client, config: &IgdbConfig, token: String) -> Self {
        Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            client_id: config.client_id.clone(),
            token,
        }
    }

    /// False when the credential exchange failed.
    pub fn is_authenticated(&self) -> bool {
        self.token != AUTH_FAILED_TOKEN
    }

    /// POST an IGDB query to `{base_url}/{endpoint}` and decode the JSON array.
    fn query<T: DeserializeOwned>(&self, endpoint: &str, body: String) -> Result<Vec<T>, IgdbError> {
        let url = format!("{}/{}", self.base_url, endpoint);
        log::debug!("POST {} <- {}", url, body);

        let resp = self
            .http
            .post(&url)
            .header("Client-ID", &self.client_id)
            .bearer_auth(&self.token)
            .header(reqwest::header::ACCEPT, "application/json")
            .body(body)
            .send()?;

        let status = resp.status();
        let text = resp.text()?;
        if !status.is_success() {
            return Err(IgdbError::status(status.as_u16(), &text));
        }

        Ok(serde_json::from_str(&text)?)
    }
}

impl CatalogApi for IgdbClient {
    fn fetch_by_ids(&self, ids: &[u64]) -> Result<Vec<DetailRecord>, IgdbError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        self.query("games", detail_query(ids))
    }

    fn search_by_term(&self, term: &str) -> Result<Vec<SearchCandidate>, IgdbError> {
        self.query("games", search_query(term))
    }
}

/// Detail query for a set of ids, expanding platform names and cover metadata.
pub fn detail_query(ids: &[u64]) -> String {
    let ids: Vec<String> = ids.iter().map(|id| id.to_string()).collect();
    format!(
        "fields *, platforms.name, cover.url, cover.width; where id = ({});",
        ids.join(",")
    )
}

/// Search query projecting only what disambiguation needs.
pub fn search_query(term: &str) -> String {
    let escaped = term.replace('\\', "\\\\").replace('"', "\\\"");
    format!("search \"{}\"; fields id, name, platforms;", escaped)
}
