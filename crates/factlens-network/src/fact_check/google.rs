use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use factlens_signals::{FactCheckEvidence, FactCheckSource};
use reqwest::{Client, StatusCode};
use serde::Deserialize;

use super::FactCheckError;
use crate::client::HttpSettings;
use crate::query::{derive_query, DEFAULT_QUERY_CHARS};

pub const DEFAULT_BASE_URL: &str = "https://factchecktools.googleapis.com/v1alpha1/claims:search";
const PLACEHOLDER_API_KEY: &str = "your_api_key_here";
const UNKNOWN: &str = "Unknown";

#[derive(Debug, Clone)]
pub struct GoogleFactCheckConfig {
    pub api_key: String,
    pub base_url: String,
    pub language_code: String,
    pub timeout: Duration,
    /// Claims kept from a response; every review of a kept claim becomes evidence.
    pub max_claims: usize,
    pub query_chars: usize,
}

impl Default for GoogleFactCheckConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            language_code: "en".to_string(),
            timeout: Duration::from_secs(10),
            max_claims: 5,
            query_chars: DEFAULT_QUERY_CHARS,
        }
    }
}

impl GoogleFactCheckConfig {
    pub fn is_configured(&self) -> bool {
        let key = self.api_key.trim();
        !key.is_empty() && key != PLACEHOLDER_API_KEY
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ClaimSearchResponse {
    #[serde(default)]
    claims: Vec<Claim>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Claim {
    text: Option<String>,
    claimant: Option<String>,
    #[serde(default)]
    claim_review: Vec<ClaimReview>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ClaimReview {
    publisher: Option<Publisher>,
    url: Option<String>,
    textual_rating: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Publisher {
    name: Option<String>,
}

impl ClaimSearchResponse {
    fn into_evidence(self, max_claims: usize) -> Vec<FactCheckEvidence> {
        let mut evidence = Vec::new();
        for claim in self.claims.into_iter().take(max_claims) {
            let text = claim.text.unwrap_or_default();
            let claimant = claim.claimant.unwrap_or_else(|| UNKNOWN.to_string());
            for review in claim.claim_review {
                evidence.push(FactCheckEvidence {
                    claim: text.clone(),
                    claimant: Some(claimant.clone()),
                    rating: review.textual_rating.unwrap_or_else(|| UNKNOWN.to_string()),
                    source: review
                        .publisher
                        .and_then(|publisher| publisher.name)
                        .unwrap_or_else(|| UNKNOWN.to_string()),
                    url: review.url,
                });
            }
        }
        evidence
    }
}

/// Google Fact Check Tools `claims:search` client.
#[derive(Debug, Clone)]
pub struct GoogleFactCheckClient {
    client: Client,
    config: GoogleFactCheckConfig,
}

impl GoogleFactCheckClient {
    pub fn new(config: GoogleFactCheckConfig) -> Result<Self> {
        let client = HttpSettings::with_timeout(config.timeout).build()?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &GoogleFactCheckConfig {
        &self.config
    }

    pub async fn search(&self, text: &str) -> Result<Vec<FactCheckEvidence>, FactCheckError> {
        if !self.config.is_configured() {
            return Err(FactCheckError::NotConfigured);
        }

        let query = derive_query(text, self.config.query_chars);
        tracing::info!(
            target: "factlens_network",
            query_len = query.len(),
            "querying fact-check API"
        );

        let response = self
            .client
            .get(&self.config.base_url)
            .query(&[
                ("query", query),
                ("key", self.config.api_key.as_str()),
                ("languageCode", self.config.language_code.as_str()),
            ])
            .send()
            .await
            .map_err(|error| self.classify(error))?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(FactCheckError::Status(status));
        }

        let body: ClaimSearchResponse = response.json().await.map_err(|error| {
            if error.is_timeout() {
                FactCheckError::Timeout(self.config.timeout)
            } else {
                FactCheckError::Decode(error)
            }
        })?;
        let evidence = body.into_evidence(self.config.max_claims);

        tracing::info!(
            target: "factlens_network",
            results = evidence.len(),
            "fact-check results received"
        );
        Ok(evidence)
    }

    fn classify(&self, error: reqwest::Error) -> FactCheckError {
        if error.is_timeout() {
            FactCheckError::Timeout(self.config.timeout)
        } else {
            FactCheckError::Transport(error)
        }
    }
}

#[async_trait]
impl FactCheckSource for GoogleFactCheckClient {
    fn name(&self) -> &'static str {
        "google-fact-check"
    }

    async fn retrieve(&self, text: &str) -> Result<Vec<FactCheckEvidence>> {
        Ok(self.search(text).await?)
    }
}
