use serde::{Deserialize, Serialize};

/// A single fact-checker review of a claim related to the analysed text.
///
/// `rating` is free text as published by the reviewer (e.g. "Mostly False",
/// "Pants on Fire"); it is bucketed later, never normalised here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactCheckEvidence {
    pub claim: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub claimant: Option<String>,
    pub rating: String,
    pub source: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl FactCheckEvidence {
    pub fn new(claim: impl Into<String>, rating: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            claim: claim.into(),
            claimant: None,
            rating: rating.into(),
            source: source.into(),
            url: None,
        }
    }

    pub fn with_claimant(mut self, claimant: impl Into<String>) -> Self {
        self.claimant = Some(claimant.into());
        self
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }
}
