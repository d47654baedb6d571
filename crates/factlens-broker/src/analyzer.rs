use std::sync::Arc;
use std::time::{Duration, Instant};

use factlens_signals::{Classifier, FactCheckEvidence, FactCheckSource, MlPrediction};

use crate::confidence::{synthesize, tally};
use crate::error::AnalysisError;
use crate::report::AnalysisResult;

pub const DEFAULT_RETRIEVAL_TIMEOUT: Duration = Duration::from_secs(10);

/// Runs one analysis: classifier and fact-check retrieval concurrently, then
/// verdict synthesis. Holds no per-request state, so one instance serves any
/// number of concurrent requests.
#[derive(Clone)]
pub struct Analyzer {
    classifier: Arc<dyn Classifier>,
    source: Arc<dyn FactCheckSource>,
    retrieval_timeout: Duration,
}

impl std::fmt::Debug for Analyzer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Analyzer")
            .field("classifier", &self.classifier.name())
            .field("source", &self.source.name())
            .field("retrieval_timeout", &self.retrieval_timeout)
            .finish()
    }
}

impl Analyzer {
    pub fn new(classifier: Arc<dyn Classifier>, source: Arc<dyn FactCheckSource>) -> Self {
        Self {
            classifier,
            source,
            retrieval_timeout: DEFAULT_RETRIEVAL_TIMEOUT,
        }
    }

    pub fn with_retrieval_timeout(mut self, timeout: Duration) -> Self {
        self.retrieval_timeout = timeout;
        self
    }

    pub fn retrieval_timeout(&self) -> Duration {
        self.retrieval_timeout
    }

    /// Analyzes already-validated text.
    ///
    /// Fails only when the classifier fails. Retrieval errors and timeouts
    /// yield empty evidence; a classifier failure cancels retrieval.
    pub async fn analyze(&self, text: &str) -> Result<AnalysisResult, AnalysisError> {
        let started = Instant::now();
        tracing::info!(
            target: "factlens_broker",
            text_len = text.len(),
            classifier = self.classifier.name(),
            source = self.source.name(),
            "analysis started"
        );

        let (ml, evidence) = tokio::try_join!(self.predict(text), async {
            Ok::<_, AnalysisError>(self.retrieve_evidence(text).await)
        })?;

        let counts = tally(&evidence);
        tracing::info!(
            target: "factlens_broker",
            results = evidence.len(),
            false_count = counts.false_count,
            true_count = counts.true_count,
            "fact-check breakdown"
        );
        let verdict = synthesize(&ml, counts, !evidence.is_empty());

        let elapsed = started.elapsed();
        tracing::info!(
            target: "factlens_broker",
            verdict = %verdict.label,
            confidence = verdict.confidence,
            elapsed_ms = elapsed.as_millis() as u64,
            "analysis complete"
        );

        Ok(AnalysisResult {
            ml,
            evidence,
            verdict,
            elapsed,
        })
    }

    async fn predict(&self, text: &str) -> Result<MlPrediction, AnalysisError> {
        self.classifier.predict(text).await.map_err(|source| {
            tracing::error!(
                target: "factlens_broker",
                classifier = self.classifier.name(),
                error = %format!("{source:#}"),
                "classifier failed"
            );
            AnalysisError::Classifier {
                classifier: self.classifier.name(),
                source,
            }
        })
    }

    async fn retrieve_evidence(&self, text: &str) -> Vec<FactCheckEvidence> {
        match tokio::time::timeout(self.retrieval_timeout, self.source.retrieve(text)).await {
            Ok(Ok(evidence)) => evidence,
            Ok(Err(error)) => {
                tracing::warn!(
                    target: "factlens_broker",
                    source = self.source.name(),
                    error = %format!("{error:#}"),
                    "fact-check retrieval failed; continuing without evidence"
                );
                Vec::new()
            }
            Err(_) => {
                tracing::warn!(
                    target: "factlens_broker",
                    source = self.source.name(),
                    timeout_ms = self.retrieval_timeout.as_millis() as u64,
                    "fact-check retrieval timed out; continuing without evidence"
                );
                Vec::new()
            }
        }
    }
}
