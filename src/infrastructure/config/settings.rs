//! Application configuration loading and validation.
//!
//! Provides the main [`Config`] struct that aggregates all application settings.
//! Configuration is loaded from a TOML file; secrets such as API keys are only
//! ever read from the environment.
//!
//! # Example
//!
//! ```no_run
//! use trustgrade::infrastructure::config::settings::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("trustgrade.toml")?;
//!     config.init_logging();
//!     Ok(())
//! }
//! ```

use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;
use url::Url;

use super::logging::LoggingConfig;
use super::provider::ProviderConfig;
use super::scoring::ScoringConfig;
use crate::application::registry::AssetRegistry;
use crate::application::scoring::settings::ScoringSettings;
use crate::domain::asset::AssetProfile;
use crate::error::{ConfigError, Result};

/// Default configuration file name.
pub const DEFAULT_CONFIG_PATH: &str = "trustgrade.toml";

/// Main application configuration.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Logging and tracing configuration.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Scoring engine parameters.
    #[serde(default)]
    pub scoring: ScoringConfig,

    /// Market-data backend.
    #[serde(default)]
    pub provider: ProviderConfig,

    /// Registered asset profiles.
    #[serde(default)]
    pub assets: Vec<AssetProfile>,
}

impl Config {
    /// Parse configuration from TOML content.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML content is malformed or validation fails.
    pub fn parse_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be read
    /// - The TOML content is malformed
    /// - Validation fails
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml(&content)
    }

    /// Validate configuration values.
    fn validate(&self) -> Result<()> {
        self.validate_scoring()?;
        self.validate_provider()?;
        self.validate_assets()
    }

    fn validate_scoring(&self) -> Result<()> {
        let scoring = &self.scoring;
        if scoring.holder_sample_size == 0 {
            return Err(ConfigError::InvalidValue {
                field: "holder_sample_size",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if scoring.min_volume_samples == 0 {
            return Err(ConfigError::InvalidValue {
                field: "min_volume_samples",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        let window = usize::try_from(scoring.volume_window_days).unwrap_or(usize::MAX);
        if window < scoring.min_volume_samples {
            return Err(ConfigError::InvalidValue {
                field: "volume_window_days",
                reason: "must be >= min_volume_samples".to_string(),
            }
            .into());
        }
        if scoring.deadline_ms == Some(0) {
            return Err(ConfigError::InvalidValue {
                field: "deadline_ms",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        let t = &scoring.timeouts;
        if t.price_ms == 0 || t.liquidity_ms == 0 || t.holders_ms == 0 || t.volume_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "timeouts",
                reason: "provider timeouts must be greater than 0".to_string(),
            }
            .into());
        }
        Ok(())
    }

    fn validate_provider(&self) -> Result<()> {
        match &self.provider {
            ProviderConfig::Http(http) => {
                if http.base_url.trim().is_empty() {
                    return Err(ConfigError::MissingField { field: "base_url" }.into());
                }
                let url = Url::parse(http.base_url.trim()).map_err(|e| {
                    ConfigError::InvalidValue {
                        field: "base_url",
                        reason: e.to_string(),
                    }
                })?;
                if !matches!(url.scheme(), "http" | "https") {
                    return Err(ConfigError::InvalidValue {
                        field: "base_url",
                        reason: format!("unsupported scheme {}", url.scheme()),
                    }
                    .into());
                }
                if http.timeout_ms == 0 {
                    return Err(ConfigError::InvalidValue {
                        field: "timeout_ms",
                        reason: "must be greater than 0".to_string(),
                    }
                    .into());
                }
            }
            ProviderConfig::Snapshot(snapshot) => {
                if snapshot.path.as_os_str().is_empty() {
                    return Err(ConfigError::MissingField { field: "path" }.into());
                }
            }
        }
        Ok(())
    }

    fn validate_assets(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for asset in &self.assets {
            if asset.id.is_blank() {
                return Err(ConfigError::MissingField { field: "assets.id" }.into());
            }
            if !seen.insert(&asset.id) {
                return Err(ConfigError::DuplicateAsset(asset.id.clone()).into());
            }
            let latency = asset.redemption_latency_hours;
            if !latency.is_finite() || latency < 0.0 {
                return Err(ConfigError::InvalidValue {
                    field: "redemption_latency_hours",
                    reason: format!("{}: must be a non-negative number", asset.id),
                }
                .into());
            }
        }
        Ok(())
    }

    /// Build the asset registry from the configured profiles.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::DuplicateAsset`] on a repeated id.
    pub fn registry(&self) -> Result<AssetRegistry> {
        AssetRegistry::from_profiles(self.assets.iter().cloned())
    }

    /// Engine parameters derived from `[scoring]`.
    #[must_use]
    pub fn scoring_settings(&self) -> ScoringSettings {
        ScoringSettings::from(&self.scoring)
    }

    /// Initialize logging with the configured settings.
    pub fn init_logging(&self) {
        self.logging.init();
    }
}
