pub mod client;
pub mod types;

pub use client::{Classifier, PredictClient};
pub use types::{ClassificationResult, PredictResponse, UNCERTAIN_LABEL};
