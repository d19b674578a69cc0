/// Errors that can occur while talking to IGDB or loading its configuration.
#[derive(Debug, thiserror::Error)]
pub enum IgdbError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IGDB returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl IgdbError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Build a status error, keeping only the start of the response body.
    pub fn status(status: u16, body: &str) -> Self {
        Self::Status {
            status,
            body: excerpt(body, 200),
        }
    }
}

fn excerpt(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_body_is_truncated() {
        let body = "x".repeat(500);
        match IgdbError::status(500, &body) {
            IgdbError::Status { status, body } => {
                assert_eq!(status, 500);
                assert_eq!(body.len(), 203);
                assert!(body.ends_with("..."));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn short_body_is_kept() {
        let err = IgdbError::status(401, "Unauthorized");
        assert_eq!(err.to_string(), "IGDB returned HTTP 401: Unauthorized");
    }
}
