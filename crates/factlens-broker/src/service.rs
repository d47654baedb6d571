use std::sync::Arc;

use tokio::sync::{mpsc, Semaphore};
use tokio::task::{JoinHandle, JoinSet};

use crate::analyzer::Analyzer;
use crate::handle::{AnalyzerHandle, AnalyzerRequest};

/// Analyses allowed to run at once when no limit is given.
pub const DEFAULT_MAX_IN_FLIGHT: usize = 8;

/// Starts the service loop on the current runtime and returns a handle to it.
pub fn spawn(analyzer: Analyzer) -> (AnalyzerHandle, JoinHandle<()>) {
    spawn_with_limit(analyzer, DEFAULT_MAX_IN_FLIGHT)
}

/// Like [`spawn`], but at most `max_in_flight` analyses run concurrently; the
/// rest wait in the request queue. A limit of zero is treated as one.
pub fn spawn_with_limit(analyzer: Analyzer, max_in_flight: usize) -> (AnalyzerHandle, JoinHandle<()>) {
    let (tx, rx) = mpsc::unbounded_channel();
    let task = tokio::spawn(run(rx, analyzer, max_in_flight));
    (AnalyzerHandle::new(tx), task)
}

pub async fn run(
    mut rx: mpsc::UnboundedReceiver<AnalyzerRequest>,
    analyzer: Analyzer,
    max_in_flight: usize,
) {
    let max_in_flight = max_in_flight.max(1);
    tracing::info!(target: "factlens_broker", max_in_flight, "service loop started");
    let limiter = Arc::new(Semaphore::new(max_in_flight));
    let mut in_flight = JoinSet::new();
    let mut next_request_id: u64 = 1;

    while let Some(req) = rx.recv().await {
        while in_flight.try_join_next().is_some() {}

        match req {
            AnalyzerRequest::Analyze { text, reply } => {
                let request_id = next_request_id;
                next_request_id = next_request_id.saturating_add(1);
                let Ok(permit) = limiter.clone().acquire_owned().await else {
                    break;
                };
                tracing::debug!(
                    target: "factlens_broker",
                    request_id,
                    text_len = text.len(),
                    "Analyze"
                );
                // Requests share nothing, so each runs on its own task.
                let analyzer = analyzer.clone();
                in_flight.spawn(async move {
                    let result = analyzer.analyze(&text).await;
                    drop(permit);
                    if reply.send(result).is_err() {
                        tracing::debug!(
                            target: "factlens_broker",
                            request_id,
                            "requester went away before the analysis finished"
                        );
                    }
                });
            }
            AnalyzerRequest::Shutdown { reply } => {
                tracing::info!(
                    target: "factlens_broker",
                    in_flight = in_flight.len(),
                    "Shutdown - draining in-flight analyses"
                );
                while in_flight.join_next().await.is_some() {}
                let _ = reply.send(());
                break;
            }
        }
    }

    while in_flight.join_next().await.is_some() {}
    tracing::info!(target: "factlens_broker", "service loop exited");
}
