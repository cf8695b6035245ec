//! Market-data provider ports.
//!
//! These are the capabilities the scoring engine consumes. Transport is the
//! adapter's concern; every method reports failure through the
//! [`ProviderError`] taxonomy so collectors can apply their fallback policy
//! without knowing where the data came from.

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::domain::{error::ProviderError, id::AssetId, metric::HolderBalance};

/// USD spot prices.
#[async_trait]
pub trait PriceProvider: Send + Sync {
    /// Current USD price of `asset`.
    async fn get_price(&self, asset: &AssetId) -> Result<Decimal, ProviderError>;

    /// Provider name for logging/debugging.
    fn provider_name(&self) -> &'static str;
}

/// Pooled liquidity across venues.
#[async_trait]
pub trait LiquidityProvider: Send + Sync {
    /// Aggregate USD liquidity for `asset` across all known venues.
    async fn get_liquidity(&self, asset: &AssetId) -> Result<Decimal, ProviderError>;

    /// Provider name for logging/debugging.
    fn provider_name(&self) -> &'static str;
}

/// Largest-holder rankings.
#[async_trait]
pub trait HolderProvider: Send + Sync {
    /// Up to `limit` largest holders of `asset`, largest first.
    async fn get_top_holders(
        &self,
        asset: &AssetId,
        limit: usize,
    ) -> Result<Vec<HolderBalance>, ProviderError>;

    /// Provider name for logging/debugging.
    fn provider_name(&self) -> &'static str;
}

/// Trading volume, current and historical.
#[async_trait]
pub trait VolumeHistoryProvider: Send + Sync {
    /// Time-ordered daily USD volume samples over the trailing `window_days`.
    async fn get_volume_series(
        &self,
        asset: &AssetId,
        window_days: u32,
    ) -> Result<Vec<Decimal>, ProviderError>;

    /// Trailing 24h USD volume.
    async fn get_volume_24h(&self, asset: &AssetId) -> Result<Decimal, ProviderError>;

    /// Provider name for logging/debugging.
    fn provider_name(&self) -> &'static str;
}
