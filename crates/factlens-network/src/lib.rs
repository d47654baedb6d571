pub mod classifier;
pub mod client;
pub mod fact_check;
pub mod query;

pub use classifier::RemoteClassifier;
pub use client::HttpSettings;
pub use fact_check::{FactCheckError, GoogleFactCheckClient, GoogleFactCheckConfig};
pub use query::derive_query;
