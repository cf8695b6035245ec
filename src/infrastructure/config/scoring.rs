//! Scoring engine configuration.

use std::time::Duration;

use serde::Deserialize;

use crate::application::scoring::settings::{ProviderTimeouts, ScoringSettings};
use crate::domain::rubric::{default_trusted_custodians, TrustedCustodians};

/// `[scoring]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct ScoringConfig {
    /// Number of top holders sampled for concentration.
    #[serde(default = "default_holder_sample_size")]
    pub holder_sample_size: usize,
    /// Days of volume history requested.
    #[serde(default = "default_volume_window_days")]
    pub volume_window_days: u32,
    /// Minimum history length for the consistency sub-score.
    #[serde(default = "default_min_volume_samples")]
    pub min_volume_samples: usize,
    /// Custodians eligible for the trusted centralized tier.
    #[serde(default = "default_trusted_custodians")]
    pub trusted_custodians: Vec<String>,
    /// Overall deadline for one scoring call, in milliseconds.
    #[serde(default)]
    pub deadline_ms: Option<u64>,
    #[serde(default)]
    pub timeouts: TimeoutsConfig,
}

const fn default_holder_sample_size() -> usize {
    20
}

const fn default_volume_window_days() -> u32 {
    30
}

const fn default_min_volume_samples() -> usize {
    7
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            holder_sample_size: default_holder_sample_size(),
            volume_window_days: default_volume_window_days(),
            min_volume_samples: default_min_volume_samples(),
            trusted_custodians: default_trusted_custodians(),
            deadline_ms: None,
            timeouts: TimeoutsConfig::default(),
        }
    }
}

/// `[scoring.timeouts]` section, all in milliseconds.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct TimeoutsConfig {
    #[serde(default = "default_price_ms")]
    pub price_ms: u64,
    #[serde(default = "default_liquidity_ms")]
    pub liquidity_ms: u64,
    #[serde(default = "default_holders_ms")]
    pub holders_ms: u64,
    #[serde(default = "default_volume_ms")]
    pub volume_ms: u64,
}

const fn default_price_ms() -> u64 {
    3000
}

const fn default_liquidity_ms() -> u64 {
    4000
}

const fn default_holders_ms() -> u64 {
    5000
}

const fn default_volume_ms() -> u64 {
    4000
}

impl Default for TimeoutsConfig {
    fn default() -> Self {
        Self {
            price_ms: default_price_ms(),
            liquidity_ms: default_liquidity_ms(),
            holders_ms: default_holders_ms(),
            volume_ms: default_volume_ms(),
        }
    }
}

impl From<TimeoutsConfig> for ProviderTimeouts {
    fn from(config: TimeoutsConfig) -> Self {
        Self {
            price: Duration::from_millis(config.price_ms),
            liquidity: Duration::from_millis(config.liquidity_ms),
            holders: Duration::from_millis(config.holders_ms),
            volume: Duration::from_millis(config.volume_ms),
        }
    }
}

impl From<&ScoringConfig> for ScoringSettings {
    fn from(config: &ScoringConfig) -> Self {
        Self {
            holder_sample_size: config.holder_sample_size,
            volume_window_days: config.volume_window_days,
            min_volume_samples: config.min_volume_samples,
            trusted_custodians: TrustedCustodians::new(&config.trusted_custodians),
            timeouts: config.timeouts.into(),
            deadline: config.deadline_ms.map(Duration::from_millis),
        }
    }
}
