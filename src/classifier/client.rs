//! HTTP client for the classification endpoint.

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use tracing::{debug, info, warn};

use crate::classifier::types::{ClassificationResult, ErrorBody, PredictResponse};
use crate::config::Settings;
use crate::error::{AppError, ClassifyError};
use crate::intake::ImageFile;

/// Multipart field the endpoint reads the upload from.
pub const FILE_FIELD: &str = "file";

#[async_trait]
pub trait Classifier: Send + Sync {
    async fn classify(&self, image: &ImageFile) -> Result<ClassificationResult, ClassifyError>;
}

/// Posts one image per call to `/predict`. No retries and no timeout.
#[derive(Debug, Clone)]
pub struct PredictClient {
    http: Client,
    predict_url: String,
}

impl PredictClient {
    pub fn new(predict_url: impl Into<String>) -> Result<Self, AppError> {
        let http = Client::builder().build()?;
        Ok(Self {
            http,
            predict_url: predict_url.into(),
        })
    }

    pub fn from_settings(settings: &Settings) -> Result<Self, AppError> {
        Self::new(settings.predict_url())
    }

    pub fn predict_url(&self) -> &str {
        &self.predict_url
    }

    fn form(image: &ImageFile) -> Result<Form, ClassifyError> {
        let mut part = Part::bytes(image.bytes.to_vec()).file_name(image.name.clone());
        if let Some(media_type) = &image.media_type {
            part = part.mime_str(media_type)?;
        }
        Ok(Form::new().part(FILE_FIELD, part))
    }
}

#[async_trait]
impl Classifier for PredictClient {
    async fn classify(&self, image: &ImageFile) -> Result<ClassificationResult, ClassifyError> {
        debug!("Sending {:?} to {}", image, self.predict_url);

        let response = self
            .http
            .post(&self.predict_url)
            .multipart(Self::form(image)?)
            .send()
            .await?;

        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            let detail = serde_json::from_slice::<ErrorBody>(&body)
                .ok()
                .and_then(|b| b.detail_message());
            warn!("Classification rejected with {}: {:?}", status, detail);
            return Err(ClassifyError::Rejected { status, detail });
        }

        let result = ClassificationResult::from(serde_json::from_slice::<PredictResponse>(&body)?);
        info!(
            "Classified {} as {} ({:.4})",
            image.name, result.label, result.confidence
        );
        Ok(result)
    }
}
