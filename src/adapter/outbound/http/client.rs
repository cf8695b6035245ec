//! REST market-data client.
//!
//! One HTTP client backs all four provider ports:
//!
//! | Port | Endpoint |
//! |------|----------|
//! | price | `GET {base}/price/{id}` |
//! | liquidity | `GET {base}/liquidity/{id}` |
//! | holders | `GET {base}/holders/{id}?limit={n}` |
//! | 24h volume | `GET {base}/volume/{id}/24h` |
//! | volume history | `GET {base}/volume/{id}/series?days={w}` |
//!
//! Transport failures map to [`ProviderError::Unavailable`], client-side
//! timeouts to [`ProviderError::Timeout`], and undecodable bodies to
//! [`ProviderError::DataInvalid`].

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::Client as HttpClient;
use rust_decimal::Decimal;
use tokio::time::sleep;
use tracing::{debug, warn};
use url::Url;

use super::dto::{
    HoldersResponse, LiquidityResponse, PriceResponse, VolumeResponse, VolumeSeriesResponse,
};
use super::settings::HttpProviderConfig;
use crate::domain::{error::ProviderError, id::AssetId, metric::HolderBalance};
use crate::error::{ConfigError, Result};
use crate::port::outbound::provider::{
    HolderProvider, LiquidityProvider, PriceProvider, VolumeHistoryProvider,
};

const NAME: &str = "http";
const API_KEY_HEADER: &str = "x-api-key";

/// HTTP client for a REST market-data API.
#[derive(Debug, Clone)]
pub struct HttpMarketData {
    http: HttpClient,
    base_url: Url,
    retry_max_attempts: u32,
    retry_backoff_ms: u64,
}

impl HttpMarketData {
    /// Build a client from configuration.
    ///
    /// Reads the API key from the environment variable named by
    /// `api_key_env`, when set.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is missing or malformed, the API key
    /// is not a valid header value, or the HTTP client cannot be built.
    pub fn from_config(config: &HttpProviderConfig) -> Result<Self> {
        if config.base_url.trim().is_empty() {
            return Err(ConfigError::MissingField { field: "base_url" }.into());
        }
        let base_url = Url::parse(config.base_url.trim())?;

        let mut headers = HeaderMap::new();
        if let Some(var) = &config.api_key_env {
            match std::env::var(var) {
                Ok(key) => {
                    let value =
                        HeaderValue::from_str(key.trim()).map_err(|e| ConfigError::InvalidValue {
                            field: "api_key_env",
                            reason: e.to_string(),
                        })?;
                    headers.insert(API_KEY_HEADER, value);
                }
                Err(_) => warn!(var = %var, "API key variable not set, sending unauthenticated"),
            }
        }

        let http = HttpClient::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .connect_timeout(Duration::from_millis(config.connect_timeout_ms))
            .default_headers(headers)
            .build()?;

        Ok(Self {
            http,
            base_url,
            retry_max_attempts: config.retry_max_attempts,
            retry_backoff_ms: config.retry_backoff_ms,
        })
    }

    fn endpoint(&self, segments: &[&str]) -> std::result::Result<Url, ProviderError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| ProviderError::invalid(NAME, "base URL cannot carry a path"))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get_with_retry<T>(&self, url: Url) -> std::result::Result<T, ProviderError>
    where
        T: serde::de::DeserializeOwned,
    {
        let mut attempt = 0;
        let max_attempts = self.retry_max_attempts.max(1);

        loop {
            attempt += 1;
            debug!(url = %url, attempt, "Requesting market data");
            let response = match self.http.get(url.clone()).send().await {
                Ok(response) => response,
                Err(err) => {
                    if attempt >= max_attempts || !Self::should_retry(&err) {
                        return Err(Self::map_error(err));
                    }
                    self.backoff(attempt, max_attempts, &err).await;
                    continue;
                }
            };

            let response = response.error_for_status().map_err(Self::map_error)?;

            match response.json::<T>().await {
                Ok(parsed) => return Ok(parsed),
                Err(err) => {
                    if attempt >= max_attempts || !Self::should_retry(&err) {
                        return Err(Self::map_error(err));
                    }
                    self.backoff(attempt, max_attempts, &err).await;
                }
            }
        }
    }

    fn should_retry(err: &reqwest::Error) -> bool {
        err.is_timeout() || err.is_connect()
    }

    fn map_error(err: reqwest::Error) -> ProviderError {
        if err.is_timeout() {
            ProviderError::Timeout { provider: NAME }
        } else if err.is_decode() {
            ProviderError::invalid(NAME, err)
        } else {
            ProviderError::unavailable(NAME, err)
        }
    }

    async fn backoff(&self, attempt: u32, max_attempts: u32, err: &reqwest::Error) {
        warn!(
            attempt,
            max_attempts,
            error = %err,
            "HTTP request failed, retrying"
        );
        if self.retry_backoff_ms > 0 {
            sleep(Duration::from_millis(self.retry_backoff_ms)).await;
        }
    }
}

#[async_trait]
impl PriceProvider for HttpMarketData {
    async fn get_price(&self, asset: &AssetId) -> std::result::Result<Decimal, ProviderError> {
        let url = self.endpoint(&["price", asset.as_str()])?;
        let body: PriceResponse = self.get_with_retry(url).await?;
        Ok(body.price)
    }

    fn provider_name(&self) -> &'static str {
        NAME
    }
}

#[async_trait]
impl LiquidityProvider for HttpMarketData {
    async fn get_liquidity(&self, asset: &AssetId) -> std::result::Result<Decimal, ProviderError> {
        let url = self.endpoint(&["liquidity", asset.as_str()])?;
        let body: LiquidityResponse = self.get_with_retry(url).await?;
        Ok(body.liquidity_usd)
    }

    fn provider_name(&self) -> &'static str {
        NAME
    }
}

#[async_trait]
impl HolderProvider for HttpMarketData {
    async fn get_top_holders(
        &self,
        asset: &AssetId,
        limit: usize,
    ) -> std::result::Result<Vec<HolderBalance>, ProviderError> {
        let mut url = self.endpoint(&["holders", asset.as_str()])?;
        url.query_pairs_mut()
            .append_pair("limit", &limit.to_string());
        let body: HoldersResponse = self.get_with_retry(url).await?;
        Ok(body.holders.into_iter().map(HolderBalance::from).collect())
    }

    fn provider_name(&self) -> &'static str {
        NAME
    }
}

#[async_trait]
impl VolumeHistoryProvider for HttpMarketData {
    async fn get_volume_series(
        &self,
        asset: &AssetId,
        window_days: u32,
    ) -> std::result::Result<Vec<Decimal>, ProviderError> {
        let mut url = self.endpoint(&["volume", asset.as_str(), "series"])?;
        url.query_pairs_mut()
            .append_pair("days", &window_days.to_string());
        let body: VolumeSeriesResponse = self.get_with_retry(url).await?;
        Ok(body.samples)
    }

    async fn get_volume_24h(&self, asset: &AssetId) -> std::result::Result<Decimal, ProviderError> {
        let url = self.endpoint(&["volume", asset.as_str(), "24h"])?;
        let body: VolumeResponse = self.get_with_retry(url).await?;
        Ok(body.volume_usd)
    }

    fn provider_name(&self) -> &'static str {
        NAME
    }
}
