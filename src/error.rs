use reqwest::StatusCode;
use thiserror::Error;

/// Shown whenever a classification fails without a server-provided detail.
pub const DEFAULT_ERROR_MESSAGE: &str = "Failed to classify waste. Please try again.";

// Main Application Error Type

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration Error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Failed to read image: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
    #[error("UI Error: {0}")]
    Ui(#[from] eframe::Error),
}

// Request Boundary Error Type

#[derive(Error, Debug)]
pub enum ClassifyError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("Classification endpoint returned {status}")]
    Rejected {
        status: StatusCode,
        detail: Option<String>,
    },
    #[error("Invalid response: {0}")]
    InvalidResponse(#[from] serde_json::Error),
}

impl ClassifyError {
    /// Collapses every failure into the single message the user sees.
    pub fn user_message(&self) -> String {
        match self {
            ClassifyError::Rejected {
                detail: Some(detail),
                ..
            } => detail.clone(),
            _ => DEFAULT_ERROR_MESSAGE.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejected_with_detail_shows_detail() {
        let error = ClassifyError::Rejected {
            status: StatusCode::PAYLOAD_TOO_LARGE,
            detail: Some("file too large".to_string()),
        };
        assert_eq!(error.user_message(), "file too large");
    }

    #[test]
    fn test_rejected_without_detail_shows_default() {
        let error = ClassifyError::Rejected {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            detail: None,
        };
        assert_eq!(error.user_message(), DEFAULT_ERROR_MESSAGE);
    }

    #[test]
    fn test_invalid_response_shows_default() {
        let parse_error = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let error = ClassifyError::from(parse_error);
        assert_eq!(error.user_message(), DEFAULT_ERROR_MESSAGE);
    }
}
