pub mod fixed;

pub use fixed::FixedClassifier;
