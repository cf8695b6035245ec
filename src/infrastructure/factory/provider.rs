//! Market-data provider factory.

use std::sync::Arc;

use tracing::info;

use crate::adapter::outbound::http::client::HttpMarketData;
use crate::adapter::outbound::snapshot::SnapshotMarketData;
use crate::application::scoring::engine::ScoringProviders;
use crate::error::Result;
use crate::infrastructure::config::provider::ProviderConfig;

/// Build the provider set for the configured backend.
///
/// # Errors
///
/// Returns an error if the HTTP client cannot be built or the snapshot file
/// cannot be loaded.
pub fn build_providers(config: &ProviderConfig) -> Result<ScoringProviders> {
    let providers = match config {
        ProviderConfig::Http(http) => {
            let client = HttpMarketData::from_config(http)?;
            info!(base_url = %http.base_url, "Using HTTP market data");
            ScoringProviders::shared(Arc::new(client))
        }
        ProviderConfig::Snapshot(snapshot) => {
            let data = SnapshotMarketData::load(&snapshot.path)?;
            ScoringProviders::shared(Arc::new(data))
        }
    };
    Ok(providers)
}
