use thiserror::Error;

/// Failures that abort an analysis. Fact-check retrieval never produces one;
/// it degrades to empty evidence instead.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// The classifier could not produce a prediction. The display text stays
    /// generic; the cause is only reachable through `source()` or [`detail`].
    ///
    /// [`detail`]: AnalysisError::detail
    #[error("analysis failed")]
    Classifier {
        classifier: &'static str,
        #[source]
        source: anyhow::Error,
    },
    #[error("analyzer service is not running")]
    ServiceUnavailable,
}

impl AnalysisError {
    /// The full cause chain, for development logs only.
    pub fn detail(&self) -> String {
        match self {
            AnalysisError::Classifier { classifier, source } => {
                format!("classifier `{classifier}` failed: {source:#}")
            }
            AnalysisError::ServiceUnavailable => self.to_string(),
        }
    }
}
