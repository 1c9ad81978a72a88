//! Controller tuning loaded from embedded JSON.
use crate::sections::FocalBand;
use serde::{Deserialize, Serialize};
use thiserror::Error;

const DEFAULT_CONTROLLER_DATA: &str = include_str!("../data/controller.json");

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{field} must be between {min} and {max} (got {value})")]
    OutOfRange {
        field: &'static str,
        min: f64,
        max: f64,
        value: f64,
    },
    #[error("{0} must not be empty")]
    Empty(&'static str),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    pub language_key: String,
    pub theme_key: String,
    pub language_query_param: String,
    pub secondary_path_marker: String,
    pub nav_offset_px: f64,
    pub section_threshold: f64,
    pub nav_scrolled_offset_px: f64,
    pub resize_debounce_ms: u32,
    pub notification_ms: u32,
    pub initial_hash_delay_ms: u32,
    pub simulated_submit_delay_ms: u32,
    pub log_level: String,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            language_key: "dreamTripLanguage".to_string(),
            theme_key: "dreamTripTheme".to_string(),
            language_query_param: "lang".to_string(),
            secondary_path_marker: "en".to_string(),
            nav_offset_px: 80.0,
            section_threshold: 0.3,
            nav_scrolled_offset_px: 100.0,
            resize_debounce_ms: 250,
            notification_ms: 3000,
            initial_hash_delay_ms: 100,
            simulated_submit_delay_ms: 2000,
            log_level: "info".to_string(),
        }
    }
}

impl ControllerConfig {
    /// Parse and validate a configuration document.
    ///
    /// # Errors
    ///
    /// Returns an error when the JSON is malformed or a value is out of range.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Embedded configuration, or defaults when it cannot be used.
    #[must_use]
    pub fn load_from_static() -> Self {
        Self::from_json(DEFAULT_CONTROLLER_DATA).unwrap_or_else(|err| {
            log::warn!("falling back to default controller config: {err}");
            Self::default()
        })
    }

    /// # Errors
    ///
    /// Returns the first field that is empty or out of range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("language_key", &self.language_key),
            ("theme_key", &self.theme_key),
            ("language_query_param", &self.language_query_param),
            ("secondary_path_marker", &self.secondary_path_marker),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigError::Empty(field));
            }
        }
        if !(self.section_threshold > 0.0 && self.section_threshold <= 1.0) {
            return Err(ConfigError::OutOfRange {
                field: "section_threshold",
                min: 0.0,
                max: 1.0,
                value: self.section_threshold,
            });
        }
        if self.nav_offset_px < 0.0 {
            return Err(ConfigError::OutOfRange {
                field: "nav_offset_px",
                min: 0.0,
                max: f64::MAX,
                value: self.nav_offset_px,
            });
        }
        Ok(())
    }

    #[must_use]
    pub const fn focal_band(&self) -> FocalBand {
        FocalBand {
            margin: self.nav_offset_px,
            threshold: self.section_threshold,
        }
    }

    /// Deployment prefix baked in at compile time (e.g. `/trip` on a project page).
    #[must_use]
    pub fn public_base() -> &'static str {
        option_env!("PUBLIC_URL").unwrap_or("")
    }

    #[must_use]
    pub fn log_filter(&self) -> log::LevelFilter {
        self.log_level.parse().unwrap_or(log::LevelFilter::Info)
    }
}
