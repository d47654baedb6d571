use tokio::sync::{mpsc, oneshot};

use crate::error::AnalysisError;
use crate::report::AnalysisResult;

#[derive(Debug)]
pub enum AnalyzerRequest {
    Analyze {
        text: String,
        reply: oneshot::Sender<Result<AnalysisResult, AnalysisError>>,
    },
    Shutdown {
        reply: oneshot::Sender<()>,
    },
}

#[derive(Clone, Debug)]
pub struct AnalyzerHandle {
    tx: mpsc::UnboundedSender<AnalyzerRequest>,
}

impl AnalyzerHandle {
    pub fn new(tx: mpsc::UnboundedSender<AnalyzerRequest>) -> Self {
        Self { tx }
    }

    async fn round_trip<T, F>(&self, build_request: F) -> Result<T, AnalysisError>
    where
        F: FnOnce(oneshot::Sender<T>) -> AnalyzerRequest,
    {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.tx
            .send(build_request(reply_tx))
            .map_err(|_| AnalysisError::ServiceUnavailable)?;
        reply_rx.await.map_err(|_| AnalysisError::ServiceUnavailable)
    }

    pub async fn analyze(&self, text: impl Into<String>) -> Result<AnalysisResult, AnalysisError> {
        let text = text.into();
        self.round_trip(|reply| AnalyzerRequest::Analyze { text, reply })
            .await?
    }

    /// Stops accepting work and waits for in-flight analyses to finish.
    pub async fn shutdown(&self) -> Result<(), AnalysisError> {
        self.round_trip(|reply| AnalyzerRequest::Shutdown { reply })
            .await
    }
}
