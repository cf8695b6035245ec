//! Scoring orchestration.
//!
//! A request moves through `Pending -> Collecting -> Aggregating -> Complete`
//! and always completes. Collecting fans out the four provider-backed
//! collectors concurrently; custody and redemption are pure and computed
//! inline. Aggregating is the single join point.

use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use futures_util::future::join_all;
use tokio::sync::watch;
use tracing::{debug, info};

use super::collector::{collect_holders, collect_liquidity, collect_peg, collect_trading};
use super::guard::CallGuard;
use super::settings::ScoringSettings;
use crate::application::registry::AssetRegistry;
use crate::domain::{
    asset::AssetProfile,
    id::AssetId,
    metric::{Component, RawMetricSet},
    rubric,
    score::{ScoreBreakdown, ScoreResult},
};
use crate::error::Result;
use crate::port::inbound::scoring::TrustScoring;
use crate::port::outbound::provider::{
    HolderProvider, LiquidityProvider, PriceProvider, VolumeHistoryProvider,
};

/// Lifecycle of one scoring request. There is no error-terminal phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoringPhase {
    Pending,
    Collecting,
    Aggregating,
    Complete,
}

impl fmt::Display for ScoringPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Pending => "pending",
            Self::Collecting => "collecting",
            Self::Aggregating => "aggregating",
            Self::Complete => "complete",
        };
        f.write_str(name)
    }
}

/// The four injected data providers.
#[derive(Clone)]
pub struct ScoringProviders {
    pub prices: Arc<dyn PriceProvider>,
    pub liquidity: Arc<dyn LiquidityProvider>,
    pub holders: Arc<dyn HolderProvider>,
    pub volume: Arc<dyn VolumeHistoryProvider>,
}

impl ScoringProviders {
    /// Use one adapter for every capability.
    pub fn shared<P>(provider: Arc<P>) -> Self
    where
        P: PriceProvider + LiquidityProvider + HolderProvider + VolumeHistoryProvider + 'static,
    {
        Self {
            prices: provider.clone(),
            liquidity: provider.clone(),
            holders: provider.clone(),
            volume: provider,
        }
    }
}

impl fmt::Debug for ScoringProviders {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScoringProviders")
            .field("prices", &PriceProvider::provider_name(self.prices.as_ref()))
            .field(
                "liquidity",
                &LiquidityProvider::provider_name(self.liquidity.as_ref()),
            )
            .field("holders", &HolderProvider::provider_name(self.holders.as_ref()))
            .field(
                "volume",
                &VolumeHistoryProvider::provider_name(self.volume.as_ref()),
            )
            .finish()
    }
}

/// Composite trust scoring engine.
///
/// Built once with its providers, settings and asset registry. Holds no
/// mutable state, so one engine can serve concurrent requests.
#[derive(Debug)]
pub struct ScoringEngine {
    providers: ScoringProviders,
    settings: ScoringSettings,
    registry: AssetRegistry,
}

impl ScoringEngine {
    #[must_use]
    pub fn new(
        providers: ScoringProviders,
        settings: ScoringSettings,
        registry: AssetRegistry,
    ) -> Self {
        Self {
            providers,
            settings,
            registry,
        }
    }

    #[must_use]
    pub const fn settings(&self) -> &ScoringSettings {
        &self.settings
    }

    #[must_use]
    pub const fn registry(&self) -> &AssetRegistry {
        &self.registry
    }

    /// Score a registered asset by id.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::Error::UnknownAsset`] if no profile is registered.
    pub async fn score_asset(&self, asset: &AssetId) -> Result<ScoreResult> {
        let profile = self.registry.get(asset)?;
        Ok(self.score(profile).await)
    }

    /// Score several registered assets concurrently, preserving request order.
    pub async fn score_assets(&self, assets: &[AssetId]) -> Vec<Result<ScoreResult>> {
        join_all(assets.iter().map(|asset| self.score_asset(asset))).await
    }

    /// Score a profile. Always returns a complete, possibly degraded result.
    pub async fn score(&self, profile: &AssetProfile) -> ScoreResult {
        let (_cancel_tx, cancel_rx) = watch::channel(false);
        self.score_with_cancel(profile, cancel_rx).await
    }

    /// Score a profile, treating cancellation like a timeout on every call
    /// still in flight.
    pub async fn score_with_cancel(
        &self,
        profile: &AssetProfile,
        cancel: watch::Receiver<bool>,
    ) -> ScoreResult {
        let asset = &profile.id;
        debug!(asset = %asset, phase = %ScoringPhase::Pending, "Scoring requested");

        let custody_security = rubric::custody_points(
            profile.custody,
            &profile.custodian,
            &self.settings.trusted_custodians,
        );
        let redemption_speed = rubric::redemption_points(profile.redemption_latency_hours);

        debug!(asset = %asset, phase = %ScoringPhase::Collecting, "Collecting metrics");
        let guard = CallGuard::new(self.settings.deadline, cancel);
        let settings = &self.settings;
        let (liquidity, holders, trading, peg) = tokio::join!(
            collect_liquidity(self.providers.liquidity.as_ref(), profile, settings, &guard),
            collect_holders(self.providers.holders.as_ref(), profile, settings, &guard),
            collect_trading(self.providers.volume.as_ref(), profile, settings, &guard),
            collect_peg(self.providers.prices.as_ref(), profile, settings, &guard),
        );

        debug!(asset = %asset, phase = %ScoringPhase::Aggregating, "Aggregating components");
        let breakdown = ScoreBreakdown {
            custody_security,
            liquidity_depth: liquidity.points,
            holder_distribution: holders.points,
            trading_activity: trading.points,
            peg_stability: peg.points,
            redemption_speed,
        };

        let degraded: BTreeSet<Component> = [
            (Component::Liquidity, liquidity.degraded),
            (Component::Holders, holders.degraded),
            (Component::Trading, trading.degraded),
            (Component::Peg, peg.degraded),
        ]
        .into_iter()
        .filter_map(|(component, degraded)| degraded.then_some(component))
        .collect();

        let metrics = RawMetricSet {
            liquidity_usd: liquidity.measurement,
            holder_concentration_pct: holders.measurement,
            volume_24h_usd: trading.measurement.volume_24h_usd,
            volume_consistency_coefficient: trading.measurement.consistency_coefficient,
            price_deviation_pct: peg.measurement,
        };

        let result =
            ScoreResult::from_breakdown(asset.clone(), &profile.symbol, breakdown, degraded, metrics);

        info!(
            asset = %asset,
            symbol = %profile.symbol,
            phase = %ScoringPhase::Complete,
            total = result.total_score,
            grade = %result.grade,
            degraded = result.degraded.len(),
            "Score computed"
        );
        result
    }
}

#[async_trait]
impl TrustScoring for ScoringEngine {
    async fn score_asset(&self, asset: &AssetId) -> Result<ScoreResult> {
        ScoringEngine::score_asset(self, asset).await
    }

    async fn score_assets(&self, assets: &[AssetId]) -> Vec<Result<ScoreResult>> {
        ScoringEngine::score_assets(self, assets).await
    }

    fn assets(&self) -> Vec<AssetProfile> {
        self.registry.iter().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use rust_decimal_macros::dec;

    use super::*;
    use crate::domain::asset::CustodyType;
    use crate::domain::error::ProviderError;
    use crate::error::Error;
    use crate::testkit::domain::{reference_metrics, reference_profile, reference_settings};
    use crate::testkit::provider::{Reply, ScriptedMarketData};

    fn engine_with(data: ScriptedMarketData, registry: AssetRegistry) -> ScoringEngine {
        ScoringEngine::new(
            ScoringProviders::shared(Arc::new(data)),
            reference_settings(),
            registry,
        )
    }

    fn engine(data: ScriptedMarketData) -> ScoringEngine {
        engine_with(data, AssetRegistry::new())
    }

    #[tokio::test]
    async fn healthy_inputs_score_ninety_eight() {
        let profile = reference_profile();
        let engine = engine(reference_metrics(&profile));

        let result = engine.score(&profile).await;

        assert_eq!(result.breakdown.custody_security, 25);
        assert_eq!(result.breakdown.liquidity_depth, 25);
        assert_eq!(result.breakdown.holder_distribution, 15);
        assert_eq!(result.breakdown.trading_activity, 15);
        assert_eq!(result.breakdown.peg_stability, 10);
        assert_eq!(result.breakdown.redemption_speed, 8);
        assert_eq!(result.total_score, 98);
        assert_eq!(result.grade.as_str(), "A");
        assert_eq!(result.label.as_str(), "Excellent");
        assert!(result.degraded.is_empty());
    }

    #[tokio::test]
    async fn records_obtained_measurements() {
        let profile = reference_profile();
        let result = engine(reference_metrics(&profile)).score(&profile).await;

        assert_eq!(result.metrics.liquidity_usd, Some(dec!(12_000_000)));
        assert_eq!(result.metrics.holder_concentration_pct, Some(dec!(3)));
        assert_eq!(result.metrics.volume_24h_usd, Some(dec!(1_200_000)));
        assert_eq!(result.metrics.price_deviation_pct, Some(dec!(0.1)));
        let cv = result.metrics.volume_consistency_coefficient.unwrap();
        assert!(cv < 0.3);
    }

    #[tokio::test]
    async fn liquidity_failure_is_fail_closed() {
        let profile = reference_profile();
        let data = reference_metrics(&profile).with_liquidity(Reply::fail(
            ProviderError::unavailable("scripted", "503"),
        ));

        let result = engine(data).score(&profile).await;

        assert_eq!(result.breakdown.liquidity_depth, 0);
        assert_eq!(result.degraded, BTreeSet::from([Component::Liquidity]));
        assert_eq!(result.breakdown.holder_distribution, 15);
        assert_eq!(result.breakdown.peg_stability, 10);
        assert_eq!(result.metrics.liquidity_usd, None);
    }

    #[tokio::test]
    async fn anchor_price_failure_is_fail_open() {
        let profile = reference_profile();
        let anchor = profile.peg_anchor.clone().unwrap();
        let data = reference_metrics(&profile).with_price(
            &anchor,
            Reply::fail(ProviderError::unavailable("scripted", "reset")),
        );

        let result = engine(data).score(&profile).await;

        assert_eq!(result.breakdown.peg_stability, 5);
        assert_eq!(result.degraded, BTreeSet::from([Component::Peg]));
    }

    #[tokio::test]
    async fn missing_anchor_is_fail_open() {
        let mut profile = reference_profile();
        profile.peg_anchor = None;
        let result = engine(reference_metrics(&profile)).score(&profile).await;

        assert_eq!(result.breakdown.peg_stability, 5);
        assert!(result.is_component_degraded(Component::Peg));
    }

    #[tokio::test(start_paused = true)]
    async fn holder_timeout_degrades_to_b_plus() {
        let profile = reference_profile();
        let data = reference_metrics(&profile)
            .with_holders(Reply::delayed(Duration::from_secs(60), Ok(Vec::new())));

        let result = engine(data).score(&profile).await;

        assert_eq!(result.breakdown.holder_distribution, 0);
        assert_eq!(result.degraded, BTreeSet::from([Component::Holders]));
        assert_eq!(result.total_score, 83);
        assert_eq!(result.grade.as_str(), "B+");
    }

    #[tokio::test(start_paused = true)]
    async fn cancellation_degrades_pending_components_only() {
        let profile = reference_profile();
        let data = reference_metrics(&profile)
            .with_liquidity(Reply::delayed(Duration::from_secs(2), Ok(dec!(12_000_000))));
        let engine = engine(data);
        let (tx, rx) = watch::channel(false);

        let score = engine.score_with_cancel(&profile, rx);
        let cancel = async {
            tokio::time::sleep(Duration::from_millis(500)).await;
            tx.send(true).unwrap();
        };
        let (result, ()) = tokio::join!(score, cancel);

        assert_eq!(result.breakdown.liquidity_depth, 0);
        assert_eq!(result.degraded, BTreeSet::from([Component::Liquidity]));
        assert_eq!(result.breakdown.holder_distribution, 15);
    }

    #[tokio::test]
    async fn every_provider_failing_still_completes() {
        let mut profile = reference_profile();
        profile.custody = CustodyType::Centralized;
        profile.custodian = "Unknown Desk".into();
        profile.redemption_latency_hours = 100.0;

        let result = engine(ScriptedMarketData::new()).score(&profile).await;

        assert_eq!(result.breakdown.custody_security, 15);
        assert_eq!(result.breakdown.liquidity_depth, 0);
        assert_eq!(result.breakdown.holder_distribution, 0);
        assert_eq!(result.breakdown.trading_activity, 0);
        assert_eq!(result.breakdown.peg_stability, 5);
        assert_eq!(result.breakdown.redemption_speed, 2);
        assert_eq!(result.total_score, 22);
        assert_eq!(
            result.degraded,
            BTreeSet::from([
                Component::Liquidity,
                Component::Holders,
                Component::Trading,
                Component::Peg
            ])
        );
    }

    #[tokio::test]
    async fn short_history_keeps_volume_points() {
        let profile = reference_profile();
        let data = reference_metrics(&profile)
            .with_volume_series(Reply::ok(vec![dec!(1_000_000); 6]));

        let result = engine(data).score(&profile).await;

        assert_eq!(result.breakdown.trading_activity, 10);
        assert!(result.is_component_degraded(Component::Trading));
        assert_eq!(result.metrics.volume_consistency_coefficient, None);
        assert_eq!(result.metrics.volume_24h_usd, Some(dec!(1_200_000)));
    }

    #[tokio::test]
    async fn volume_failure_zeroes_both_sub_scores() {
        let profile = reference_profile();
        let data = reference_metrics(&profile).with_volume_24h(Reply::fail(
            ProviderError::invalid("scripted", "not a number"),
        ));

        let result = engine(data).score(&profile).await;

        assert_eq!(result.breakdown.trading_activity, 0);
        assert!(result.is_component_degraded(Component::Trading));
        assert_eq!(result.metrics.volume_consistency_coefficient, None);
    }

    #[tokio::test]
    async fn empty_holder_list_scores_zero() {
        let profile = reference_profile();
        let data = reference_metrics(&profile).with_holders(Reply::ok(Vec::new()));

        let result = engine(data).score(&profile).await;

        assert_eq!(result.breakdown.holder_distribution, 0);
        assert!(result.is_component_degraded(Component::Holders));
        assert_eq!(result.metrics.holder_concentration_pct, Some(dec!(0)));
    }

    #[tokio::test]
    async fn repeated_scoring_is_identical() {
        let profile = reference_profile();
        let engine = engine(reference_metrics(&profile));

        let first = serde_json::to_vec(&engine.score(&profile).await).unwrap();
        let second = serde_json::to_vec(&engine.score(&profile).await).unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn unknown_asset_is_the_only_hard_failure() {
        let engine = engine(ScriptedMarketData::new());
        let err = engine.score_asset(&AssetId::new("missing")).await.unwrap_err();
        assert!(matches!(err, Error::UnknownAsset(id) if id.as_str() == "missing"));
    }

    #[tokio::test]
    async fn registered_asset_scores_through_port() {
        let profile = reference_profile();
        let mut registry = AssetRegistry::new();
        registry.insert(profile.clone()).unwrap();
        let engine = engine_with(reference_metrics(&profile), registry);

        let scoring: &dyn TrustScoring = &engine;
        let result = scoring.score_asset(&profile.id).await.unwrap();
        assert_eq!(result.total_score, 98);
        assert_eq!(scoring.assets(), vec![profile]);
    }

    #[tokio::test]
    async fn batch_scoring_keeps_request_order() {
        let profile = reference_profile();
        let mut registry = AssetRegistry::new();
        registry.insert(profile.clone()).unwrap();
        let engine = engine_with(reference_metrics(&profile), registry);

        let ids = [AssetId::new("missing"), profile.id.clone()];
        let results = engine.score_assets(&ids).await;

        assert_eq!(results.len(), 2);
        assert!(matches!(&results[0], Err(Error::UnknownAsset(id)) if id.as_str() == "missing"));
        assert_eq!(results[1].as_ref().unwrap().total_score, 98);
    }
}
