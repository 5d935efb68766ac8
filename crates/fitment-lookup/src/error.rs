//! Lookup error types.

use crate::stage::LookupStage;

/// Errors from the vehicle lookup API.
#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    #[error("HTTP error: {status} for {url}")]
    Http { status: u16, url: String },

    #[error("Timeout: {0}")]
    Timeout(String),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Request error: {0}")]
    Request(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Body is not JSON or lacks the expected field.
    #[error("Malformed {stage} response: {reason}")]
    MalformedResponse { stage: LookupStage, reason: String },

    /// The API answered with `success: false`.
    #[error("{0} lookup reported failure")]
    Unsuccessful(LookupStage),
}

impl LookupError {
    pub(crate) fn malformed(stage: LookupStage, reason: impl Into<String>) -> Self {
        Self::MalformedResponse {
            stage,
            reason: reason.into(),
        }
    }
}

impl From<reqwest::Error> for LookupError {
    fn from(e: reqwest::Error) -> Self {
        let url = e.url().map(|u| u.to_string()).unwrap_or_default();
        if e.is_timeout() {
            LookupError::Timeout(url)
        } else if e.is_connect() {
            LookupError::Connection(e.to_string())
        } else if let Some(status) = e.status() {
            LookupError::Http {
                status: status.as_u16(),
                url,
            }
        } else {
            LookupError::Request(e.to_string())
        }
    }
}

impl From<url::ParseError> for LookupError {
    fn from(e: url::ParseError) -> Self {
        LookupError::InvalidUrl(e.to_string())
    }
}
