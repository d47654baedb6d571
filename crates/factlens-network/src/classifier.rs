use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use factlens_signals::{ClassProbabilities, Classifier, MlLabel, MlPrediction};
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::client::HttpSettings;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Classifier served by an HTTP inference endpoint.
///
/// The endpoint receives `{"text": "..."}` and may answer with any of:
/// - `{"prediction": "FAKE", "confidence": 0.93}` (extra fields ignored)
/// - `{"logits": [1.2, -0.4]}` as `[fake, real]`
/// - `{"probabilities": {"FAKE": 0.1, "REAL": 0.9}}`
#[derive(Debug, Clone)]
pub struct RemoteClassifier {
    client: Client,
    endpoint: String,
}

#[derive(Serialize)]
struct InferenceRequest<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum InferenceResponse {
    Labelled { prediction: MlLabel, confidence: f64 },
    Logits { logits: [f64; 2] },
    Probabilities { probabilities: ClassProbabilities },
}

impl InferenceResponse {
    fn into_prediction(self) -> Result<MlPrediction> {
        match self {
            InferenceResponse::Labelled {
                prediction,
                confidence,
            } => {
                if !(0.0..=1.0).contains(&confidence) {
                    return Err(anyhow!("classifier confidence {confidence} outside [0, 1]"));
                }
                Ok(MlPrediction::new(prediction, confidence))
            }
            InferenceResponse::Logits { logits } => MlPrediction::from_logits(logits)
                .ok_or_else(|| anyhow!("classifier returned non-finite logits {logits:?}")),
            InferenceResponse::Probabilities { probabilities } => {
                MlPrediction::from_probabilities([probabilities.fake, probabilities.real])
                    .ok_or_else(|| anyhow!("classifier returned invalid probabilities {probabilities:?}"))
            }
        }
    }
}

impl RemoteClassifier {
    pub fn new(endpoint: impl Into<String>) -> Result<Self> {
        Self::with_timeout(endpoint, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(endpoint: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = HttpSettings::with_timeout(timeout)
            .build()
            .context("failed to build classifier HTTP client")?;
        Ok(Self::with_client(client, endpoint))
    }

    pub fn with_client(client: Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl Classifier for RemoteClassifier {
    fn name(&self) -> &'static str {
        "remote"
    }

    async fn predict(&self, text: &str) -> Result<MlPrediction> {
        tracing::debug!(
            target: "factlens_network",
            endpoint = %self.endpoint,
            text_len = text.len(),
            "requesting remote classification"
        );

        let response = self
            .client
            .post(&self.endpoint)
            .json(&InferenceRequest { text })
            .send()
            .await
            .with_context(|| format!("classifier request to {} failed", self.endpoint))?;

        let status = response.status();
        if !status.is_success() {
            return Err(anyhow!("classifier endpoint returned status {status}"));
        }

        let body: InferenceResponse = response
            .json()
            .await
            .context("classifier response was not a recognised prediction")?;
        let prediction = body.into_prediction()?;

        tracing::info!(
            target: "factlens_network",
            label = %prediction.label(),
            confidence = prediction.confidence(),
            "classifier prediction"
        );
        Ok(prediction)
    }
}
