use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FactCheckError {
    #[error("fact-check API key is not configured")]
    NotConfigured,
    #[error("fact-check request timed out after {0:?}")]
    Timeout(Duration),
    #[error("fact-check API returned status {0}")]
    Status(reqwest::StatusCode),
    #[error("fact-check request failed")]
    Transport(#[source] reqwest::Error),
    #[error("fact-check response could not be decoded")]
    Decode(#[source] reqwest::Error),
}
