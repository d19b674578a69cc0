use reqwest::blocking::Client;

use crate::config::IgdbConfig;
use crate::error::IgdbError;
use crate::types::TokenResponse;

/// Bearer token used when the credential exchange fails. IGDB rejects it,
/// so every later call fails with an error instead of the run aborting.
pub const AUTH_FAILED_TOKEN: &str = "failed-to-authenticate";

/// Exchange the client id and secret for an app access token.
///
/// `POST {auth_base_url}{auth_path}?client_id=..&client_secret=..&grant_type=client_credentials`
pub fn request_token(http: &Client, config: &IgdbConfig) -> Result<TokenResponse, IgdbError> {
    let url = format!("{}{}", config.auth_base_url, config.auth_path);
    log::debug!("Requesting IGDB access token from {}", url);

    let resp = http
        .post(&url)
        .query(&[
            ("client_id", config.client_id.as_str()),
            ("client_secret", config.client_secret.as_str()),
            ("grant_type", "client_credentials"),
        ])
        .send()?;

    let status = resp.status();
    let text = resp.text()?;
    if !status.is_success() {
        return Err(IgdbError::status(status.as_u16(), &text));
    }

    let token: TokenResponse = serde_json::from_str(&text)?;
    log::debug!(
        "Received {} token, expires in {}s",
        token.token_type,
        token.expires_in
    );
    Ok(token)
}
