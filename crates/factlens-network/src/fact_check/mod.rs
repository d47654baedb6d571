pub mod error;
pub mod google;

pub use error::FactCheckError;
pub use google::{GoogleFactCheckClient, GoogleFactCheckConfig};
