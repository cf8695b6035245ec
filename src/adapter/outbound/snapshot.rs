//! File-backed market data.
//!
//! Serves every provider port from a TOML file of frozen per-asset values.
//! Useful offline and for reproducible scores: the same snapshot always
//! yields the same result.
//!
//! ```toml
//! [[asset]]
//! id = "tbtc-mint"
//! price = "100.1"
//! liquidity_usd = 12000000
//! volume_24h_usd = 1200000
//! volume_series = [1000000, 1100000, 900000]
//! holders = [{ address = "a", balance = 3 }]
//! ```

use std::collections::HashMap;
use std::path::Path;

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::info;

use crate::domain::{error::ProviderError, id::AssetId, metric::HolderBalance};
use crate::error::{ConfigError, Result};
use crate::port::outbound::provider::{
    HolderProvider, LiquidityProvider, PriceProvider, VolumeHistoryProvider,
};

const NAME: &str = "snapshot";

#[derive(Debug, Deserialize)]
struct SnapshotFile {
    #[serde(default, rename = "asset")]
    assets: Vec<SnapshotAsset>,
}

/// Frozen values for one asset. Absent fields answer as unavailable.
#[derive(Debug, Clone, Deserialize)]
pub struct SnapshotAsset {
    pub id: AssetId,
    #[serde(default)]
    pub price: Option<Decimal>,
    #[serde(default)]
    pub liquidity_usd: Option<Decimal>,
    #[serde(default)]
    pub volume_24h_usd: Option<Decimal>,
    #[serde(default)]
    pub volume_series: Option<Vec<Decimal>>,
    #[serde(default)]
    pub holders: Option<Vec<HolderBalance>>,
}

/// Provider serving frozen values from a snapshot file.
#[derive(Debug, Clone, Default)]
pub struct SnapshotMarketData {
    assets: HashMap<AssetId, SnapshotAsset>,
}

impl SnapshotMarketData {
    /// Parse snapshot TOML.
    ///
    /// # Errors
    ///
    /// Returns an error on malformed TOML or a repeated asset id.
    pub fn parse_toml(content: &str) -> Result<Self> {
        let file: SnapshotFile = toml::from_str(content).map_err(ConfigError::Parse)?;
        let mut assets = HashMap::with_capacity(file.assets.len());
        for asset in file.assets {
            if assets.contains_key(&asset.id) {
                return Err(ConfigError::DuplicateAsset(asset.id).into());
            }
            assets.insert(asset.id.clone(), asset);
        }
        Ok(Self { assets })
    }

    /// Load a snapshot file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::ReadFile)?;
        let snapshot = Self::parse_toml(&content)?;
        info!(
            path = %path.as_ref().display(),
            assets = snapshot.assets.len(),
            "Snapshot loaded"
        );
        Ok(snapshot)
    }

    fn field<T: Clone>(
        &self,
        asset: &AssetId,
        what: &str,
        pick: impl Fn(&SnapshotAsset) -> Option<&T>,
    ) -> std::result::Result<T, ProviderError> {
        self.assets
            .get(asset)
            .and_then(pick)
            .cloned()
            .ok_or_else(|| ProviderError::unavailable(NAME, format!("no {what} for {asset}")))
    }
}

#[async_trait]
impl PriceProvider for SnapshotMarketData {
    async fn get_price(&self, asset: &AssetId) -> std::result::Result<Decimal, ProviderError> {
        self.field(asset, "price", |a| a.price.as_ref())
    }

    fn provider_name(&self) -> &'static str {
        NAME
    }
}

#[async_trait]
impl LiquidityProvider for SnapshotMarketData {
    async fn get_liquidity(&self, asset: &AssetId) -> std::result::Result<Decimal, ProviderError> {
        self.field(asset, "liquidity", |a| a.liquidity_usd.as_ref())
    }

    fn provider_name(&self) -> &'static str {
        NAME
    }
}

#[async_trait]
impl HolderProvider for SnapshotMarketData {
    async fn get_top_holders(
        &self,
        asset: &AssetId,
        limit: usize,
    ) -> std::result::Result<Vec<HolderBalance>, ProviderError> {
        let mut holders = self.field(asset, "holders", |a| a.holders.as_ref())?;
        holders.sort_by(|a, b| b.balance.cmp(&a.balance));
        holders.truncate(limit);
        Ok(holders)
    }

    fn provider_name(&self) -> &'static str {
        NAME
    }
}

#[async_trait]
impl VolumeHistoryProvider for SnapshotMarketData {
    async fn get_volume_series(
        &self,
        asset: &AssetId,
        window_days: u32,
    ) -> std::result::Result<Vec<Decimal>, ProviderError> {
        let series = self.field(asset, "volume history", |a| a.volume_series.as_ref())?;
        let keep = usize::try_from(window_days).unwrap_or(usize::MAX);
        let skip = series.len().saturating_sub(keep);
        Ok(series.into_iter().skip(skip).collect())
    }

    async fn get_volume_24h(&self, asset: &AssetId) -> std::result::Result<Decimal, ProviderError> {
        self.field(asset, "volume", |a| a.volume_24h_usd.as_ref())
    }

    fn provider_name(&self) -> &'static str {
        NAME
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use rust_decimal_macros::dec;

    const SNAPSHOT: &str = r#"
[[asset]]
id = "tbtc-mint"
price = "100.1"
liquidity_usd = 12000000
volume_24h_usd = "1200000"
volume_series = [1, 2, 3, 4, 5]
holders = [
    { address = "small", balance = 1 },
    { address = "large", balance = 9 },
    { address = "mid", balance = 5 },
]

[[asset]]
id = "bare-mint"
"#;

    #[tokio::test]
    async fn serves_frozen_values() {
        let data = SnapshotMarketData::parse_toml(SNAPSHOT).unwrap();
        let id = AssetId::new("tbtc-mint");

        assert_eq!(data.get_price(&id).await, Ok(dec!(100.1)));
        assert_eq!(data.get_liquidity(&id).await, Ok(dec!(12_000_000)));
        assert_eq!(data.get_volume_24h(&id).await, Ok(dec!(1_200_000)));
    }

    #[tokio::test]
    async fn holders_are_ranked_and_limited() {
        let data = SnapshotMarketData::parse_toml(SNAPSHOT).unwrap();
        let holders = data.get_top_holders(&AssetId::new("tbtc-mint"), 2).await.unwrap();
        let addresses: Vec<&str> = holders.iter().map(|h| h.address.as_str()).collect();
        assert_eq!(addresses, vec!["large", "mid"]);
    }

    #[tokio::test]
    async fn series_keeps_trailing_window() {
        let data = SnapshotMarketData::parse_toml(SNAPSHOT).unwrap();
        let series = data
            .get_volume_series(&AssetId::new("tbtc-mint"), 3)
            .await
            .unwrap();
        assert_eq!(series, vec![dec!(3), dec!(4), dec!(5)]);
    }

    #[tokio::test]
    async fn absent_values_are_unavailable() {
        let data = SnapshotMarketData::parse_toml(SNAPSHOT).unwrap();
        let err = data.get_price(&AssetId::new("bare-mint")).await.unwrap_err();
        assert!(matches!(err, ProviderError::Unavailable { provider: "snapshot", .. }));
        let err = data.get_liquidity(&AssetId::new("nope")).await.unwrap_err();
        assert!(matches!(err, ProviderError::Unavailable { .. }));
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let err = SnapshotMarketData::parse_toml("[[asset]]\nid = \"a\"\n[[asset]]\nid = \"a\"\n")
            .unwrap_err();
        assert!(matches!(err, Error::Config(ConfigError::DuplicateAsset(_))));
    }
}
