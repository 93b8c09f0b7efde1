//! Wire types for the `/predict` endpoint.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Label the endpoint returns when no category is confident enough.
pub const UNCERTAIN_LABEL: &str = "uncertain";

/// Success body of `POST /predict`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictResponse {
    pub prediction: Prediction,
    /// Class name to probability, in the order the endpoint sent them.
    pub all_probabilities: IndexMap<String, f32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Prediction {
    pub label: String,
    pub confidence: f32,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Error body of any non-2xx response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    /// FastAPI puts a string here for `HTTPException`, but a list of
    /// objects for validation failures. Only the string form is shown.
    #[serde(default)]
    pub detail: Option<serde_json::Value>,
}

impl ErrorBody {
    pub fn detail_message(&self) -> Option<String> {
        match &self.detail {
            Some(serde_json::Value::String(detail)) if !detail.is_empty() => Some(detail.clone()),
            _ => None,
        }
    }
}

/// A classification as held by the client.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassificationResult {
    pub label: String,
    pub confidence: f32,
    pub tags: Vec<String>,
    pub description: Option<String>,
    pub all_probabilities: IndexMap<String, f32>,
}

impl ClassificationResult {
    pub fn is_uncertain(&self) -> bool {
        self.label == UNCERTAIN_LABEL
    }
}

impl From<PredictResponse> for ClassificationResult {
    fn from(response: PredictResponse) -> Self {
        let Prediction {
            label,
            confidence,
            tags,
            description,
        } = response.prediction;

        Self {
            label,
            confidence,
            tags,
            description: description.filter(|d| !d.trim().is_empty()),
            all_probabilities: response.all_probabilities,
        }
    }
}
