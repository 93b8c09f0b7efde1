pub mod app;
pub mod classifier;
pub mod config;
pub mod error;
pub mod intake;
pub mod presentation;
pub mod state;

pub use app::ClassifierApp;
pub use classifier::{ClassificationResult, Classifier, PredictClient};
pub use config::Settings;
pub use error::{AppError, ClassifyError};
