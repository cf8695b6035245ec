//! Scripted market-data provider.
//!
//! [`ScriptedMarketData`] implements every provider port from a fixed script.
//! Each reply can succeed, fail, or be delayed; anything not scripted fails
//! with [`ProviderError::Unavailable`]. Calls are recorded so tests can
//! assert on fan-out.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use rust_decimal::Decimal;

use crate::domain::{error::ProviderError, id::AssetId, metric::HolderBalance};
use crate::port::outbound::provider::{
    HolderProvider, LiquidityProvider, PriceProvider, VolumeHistoryProvider,
};

const NAME: &str = "scripted";

/// One scripted provider answer.
#[derive(Debug, Clone)]
pub struct Reply<T> {
    delay: Option<Duration>,
    result: Result<T, ProviderError>,
}

impl<T: Clone> Reply<T> {
    /// Answer immediately with `value`.
    pub fn ok(value: T) -> Self {
        Self {
            delay: None,
            result: Ok(value),
        }
    }

    /// Fail immediately with `err`.
    pub fn fail(err: ProviderError) -> Self {
        Self {
            delay: None,
            result: Err(err),
        }
    }

    /// Answer with `result` after `delay`.
    pub fn delayed(delay: Duration, result: Result<T, ProviderError>) -> Self {
        Self {
            delay: Some(delay),
            result,
        }
    }

    async fn play(reply: Option<&Self>, what: &str) -> Result<T, ProviderError> {
        let Some(reply) = reply.cloned() else {
            return Err(ProviderError::unavailable(NAME, format!("{what} not scripted")));
        };
        if let Some(delay) = reply.delay {
            tokio::time::sleep(delay).await;
        }
        reply.result
    }
}

/// Provider double answering every port from a script.
#[derive(Debug, Default)]
pub struct ScriptedMarketData {
    prices: HashMap<AssetId, Reply<Decimal>>,
    liquidity: Option<Reply<Decimal>>,
    holders: Option<Reply<Vec<HolderBalance>>>,
    volume_24h: Option<Reply<Decimal>>,
    volume_series: Option<Reply<Vec<Decimal>>>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedMarketData {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_price(mut self, asset: &AssetId, reply: Reply<Decimal>) -> Self {
        self.prices.insert(asset.clone(), reply);
        self
    }

    #[must_use]
    pub fn with_liquidity(mut self, reply: Reply<Decimal>) -> Self {
        self.liquidity = Some(reply);
        self
    }

    #[must_use]
    pub fn with_holders(mut self, reply: Reply<Vec<HolderBalance>>) -> Self {
        self.holders = Some(reply);
        self
    }

    #[must_use]
    pub fn with_volume_24h(mut self, reply: Reply<Decimal>) -> Self {
        self.volume_24h = Some(reply);
        self
    }

    #[must_use]
    pub fn with_volume_series(mut self, reply: Reply<Vec<Decimal>>) -> Self {
        self.volume_series = Some(reply);
        self
    }

    /// Calls received so far, as `"<method>:<asset>"`.
    #[must_use]
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }

    fn record(&self, method: &str, asset: &AssetId) {
        self.calls.lock().push(format!("{method}:{asset}"));
    }
}

#[async_trait]
impl PriceProvider for ScriptedMarketData {
    async fn get_price(&self, asset: &AssetId) -> Result<Decimal, ProviderError> {
        self.record("price", asset);
        Reply::play(self.prices.get(asset), "price").await
    }

    fn provider_name(&self) -> &'static str {
        NAME
    }
}

#[async_trait]
impl LiquidityProvider for ScriptedMarketData {
    async fn get_liquidity(&self, asset: &AssetId) -> Result<Decimal, ProviderError> {
        self.record("liquidity", asset);
        Reply::play(self.liquidity.as_ref(), "liquidity").await
    }

    fn provider_name(&self) -> &'static str {
        NAME
    }
}

#[async_trait]
impl HolderProvider for ScriptedMarketData {
    async fn get_top_holders(
        &self,
        asset: &AssetId,
        _limit: usize,
    ) -> Result<Vec<HolderBalance>, ProviderError> {
        self.record("holders", asset);
        Reply::play(self.holders.as_ref(), "holders").await
    }

    fn provider_name(&self) -> &'static str {
        NAME
    }
}

#[async_trait]
impl VolumeHistoryProvider for ScriptedMarketData {
    async fn get_volume_series(
        &self,
        asset: &AssetId,
        _window_days: u32,
    ) -> Result<Vec<Decimal>, ProviderError> {
        self.record("volume_series", asset);
        Reply::play(self.volume_series.as_ref(), "volume series").await
    }

    async fn get_volume_24h(&self, asset: &AssetId) -> Result<Decimal, ProviderError> {
        self.record("volume_24h", asset);
        Reply::play(self.volume_24h.as_ref(), "volume").await
    }

    fn provider_name(&self) -> &'static str {
        NAME
    }
}
