use async_trait::async_trait;

use crate::{FactCheckEvidence, MlPrediction};

/// Produces a label and confidence for a piece of text.
///
/// A failure here is fatal to the request: there is no substitute signal.
#[async_trait]
pub trait Classifier: Send + Sync {
    fn name(&self) -> &'static str;
    async fn predict(&self, text: &str) -> anyhow::Result<MlPrediction>;
}

/// Produces third-party fact-check verdicts related to a piece of text.
///
/// Implementations are free to derive a shorter query from `text`. Callers treat
/// any error as "no evidence found".
#[async_trait]
pub trait FactCheckSource: Send + Sync {
    fn name(&self) -> &'static str;
    async fn retrieve(&self, text: &str) -> anyhow::Result<Vec<FactCheckEvidence>>;
}
