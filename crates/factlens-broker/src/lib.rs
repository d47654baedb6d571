pub mod analyzer;
pub mod confidence;
pub mod error;
pub mod handle;
pub mod report;
pub mod service;

pub use analyzer::{Analyzer, DEFAULT_RETRIEVAL_TIMEOUT};
pub use confidence::{
    classify, synthesize, tally, EvidenceTally, RatingBucket, Verdict, VerdictLabel, VerdictRule,
};
pub use error::AnalysisError;
pub use handle::{AnalyzerHandle, AnalyzerRequest};
pub use report::{AnalysisReport, AnalysisResult};
