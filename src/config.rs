use config::{Config, Environment, File};
use serde::Deserialize;

use crate::error::AppError;

const CONFIG_FILE: &str = "waste-classifier";
const ENV_PREFIX: &str = "WASTE_CLASSIFIER";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub server: ServerSettings,
    pub window: WindowSettings,
    pub log_level: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub base_url: String,
    pub predict_path: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WindowSettings {
    pub title: String,
    pub width: f32,
    pub height: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server: ServerSettings::default(),
            window: WindowSettings::default(),
            log_level: "info".to_string(),
        }
    }
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000".to_string(),
            predict_path: "/predict".to_string(),
        }
    }
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            title: "Waste Classification AI".to_string(),
            width: 1100.0,
            height: 760.0,
        }
    }
}

impl Settings {
    /// Layers `waste-classifier.toml` (optional) and `WASTE_CLASSIFIER__*`
    /// environment variables over the built-in defaults.
    pub fn load() -> Result<Self, AppError> {
        let config = Config::builder()
            .add_source(File::with_name(CONFIG_FILE).required(false))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?;
        Ok(config.try_deserialize()?)
    }

    pub fn predict_url(&self) -> String {
        format!(
            "{}/{}",
            self.server.base_url.trim_end_matches('/'),
            self.server.predict_path.trim_start_matches('/')
        )
    }

    pub fn max_log_level(&self) -> tracing::Level {
        self.log_level.parse().unwrap_or(tracing::Level::INFO)
    }
}
