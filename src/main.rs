use std::sync::Arc;

use tracing::info;
use waste_classifier::{AppError, ClassifierApp, PredictClient, Settings};

fn init_logging(settings: &Settings) {
    tracing_subscriber::fmt()
        .with_max_level(settings.max_log_level())
        .init();
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let settings = Settings::load()?;
    init_logging(&settings);

    info!("Classification endpoint: {}", settings.predict_url());
    let classifier = Arc::new(PredictClient::from_settings(&settings)?);

    ClassifierApp::start_gui(&settings, classifier)
}
