//! Scoring engine factory.

use tracing::info;

use super::provider::build_providers;
use crate::application::scoring::engine::ScoringEngine;
use crate::error::Result;
use crate::infrastructure::config::settings::Config;

/// Wire providers, settings and the asset registry into an engine.
///
/// # Errors
///
/// Returns an error if the providers cannot be built or the asset list
/// contains a duplicate id.
pub fn build_engine(config: &Config) -> Result<ScoringEngine> {
    let registry = config.registry()?;
    let providers = build_providers(&config.provider)?;
    let settings = config.scoring_settings();

    info!(
        provider = config.provider.kind(),
        assets = registry.len(),
        holder_sample_size = settings.holder_sample_size,
        volume_window_days = settings.volume_window_days,
        "Scoring engine ready"
    );

    Ok(ScoringEngine::new(providers, settings, registry))
}
