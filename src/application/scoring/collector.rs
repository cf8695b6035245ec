//! Collectors for the provider-backed components.
//!
//! Each collector calls its provider through a [`CallGuard`], normalizes the
//! measurement, and applies the component's failure policy:
//!
//! | Component | On failure | Points |
//! |-----------|------------|--------|
//! | Liquidity | fail-closed | 0 |
//! | Holders   | fail-closed | 0 |
//! | Trading   | per sub-score | volume failure zeroes both, history failure zeroes consistency |
//! | Peg       | fail-open   | 5 |
//!
//! Collectors never return an error: every [`ProviderError`] becomes a
//! fallback value plus a degraded marker.

use rust_decimal::Decimal;
use tracing::{debug, warn};

use super::guard::CallGuard;
use super::settings::ScoringSettings;
use crate::domain::{
    asset::AssetProfile,
    error::ProviderError,
    metric::Component,
    rubric::{self, FAIL_CLOSED_POINTS, PEG_NEUTRAL_POINTS},
};
use crate::port::outbound::provider::{
    HolderProvider, LiquidityProvider, PriceProvider, VolumeHistoryProvider,
};

/// Points, measurement and degraded flag produced by one collector.
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentOutcome<M> {
    pub points: u8,
    pub measurement: M,
    pub degraded: bool,
}

impl<M> ComponentOutcome<M> {
    fn measured(points: u8, measurement: M) -> Self {
        Self {
            points,
            measurement,
            degraded: false,
        }
    }

    fn fallback(points: u8, measurement: M) -> Self {
        Self {
            points,
            measurement,
            degraded: true,
        }
    }
}

/// Raw trading measurements; either half may be missing.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TradingMeasurement {
    pub volume_24h_usd: Option<Decimal>,
    pub consistency_coefficient: Option<f64>,
}

fn log_fallback(component: Component, profile: &AssetProfile, points: u8, err: &ProviderError) {
    warn!(
        asset = %profile.id,
        component = %component,
        kind = err.kind(),
        error = %err,
        fallback_points = points,
        "Using fallback value"
    );
}

/// Liquidity depth, fail-closed.
pub async fn collect_liquidity(
    provider: &dyn LiquidityProvider,
    profile: &AssetProfile,
    settings: &ScoringSettings,
    guard: &CallGuard,
) -> ComponentOutcome<Option<Decimal>> {
    let name = provider.provider_name();
    let result = guard
        .run(name, settings.timeouts.liquidity, provider.get_liquidity(&profile.id))
        .await
        .and_then(|usd| {
            if usd < Decimal::ZERO {
                Err(ProviderError::invalid(name, format!("negative liquidity {usd}")))
            } else {
                Ok(usd)
            }
        });

    match result {
        Ok(usd) => {
            let points = rubric::liquidity_points(usd);
            debug!(asset = %profile.id, liquidity_usd = %usd, points, "Liquidity collected");
            ComponentOutcome::measured(points, Some(usd))
        }
        Err(err) => {
            log_fallback(Component::Liquidity, profile, FAIL_CLOSED_POINTS, &err);
            ComponentOutcome::fallback(FAIL_CLOSED_POINTS, None)
        }
    }
}

/// Holder distribution, fail-closed.
///
/// An empty ranking reports 0% concentration of known supply but still
/// scores zero: absent data is not a decentralization signal.
pub async fn collect_holders(
    provider: &dyn HolderProvider,
    profile: &AssetProfile,
    settings: &ScoringSettings,
    guard: &CallGuard,
) -> ComponentOutcome<Option<Decimal>> {
    let name = provider.provider_name();
    let limit = settings.holder_sample_size;
    let result = guard
        .run(
            name,
            settings.timeouts.holders,
            provider.get_top_holders(&profile.id, limit),
        )
        .await;

    let mut holders = match result {
        Ok(holders) => holders,
        Err(err) => {
            log_fallback(Component::Holders, profile, FAIL_CLOSED_POINTS, &err);
            return ComponentOutcome::fallback(FAIL_CLOSED_POINTS, None);
        }
    };

    if holders.is_empty() {
        warn!(asset = %profile.id, "Holder provider returned no holders");
        return ComponentOutcome::fallback(FAIL_CLOSED_POINTS, Some(Decimal::ZERO));
    }
    holders.truncate(limit);

    match rubric::holder_concentration_pct(&holders) {
        Some(pct) => {
            let points = rubric::holder_points(pct);
            debug!(
                asset = %profile.id,
                sampled = holders.len(),
                concentration_pct = %pct,
                points,
                "Holders collected"
            );
            ComponentOutcome::measured(points, Some(pct))
        }
        None => {
            let err =
                ProviderError::invalid(name, "sampled balances do not sum to a usable supply");
            log_fallback(Component::Holders, profile, FAIL_CLOSED_POINTS, &err);
            ComponentOutcome::fallback(FAIL_CLOSED_POINTS, None)
        }
    }
}

/// Trading activity: volume sub-score plus consistency sub-score, capped at 15.
///
/// The 24h volume and the trailing history are requested concurrently.
pub async fn collect_trading(
    provider: &dyn VolumeHistoryProvider,
    profile: &AssetProfile,
    settings: &ScoringSettings,
    guard: &CallGuard,
) -> ComponentOutcome<TradingMeasurement> {
    let name = provider.provider_name();
    let timeout = settings.timeouts.volume;

    let (volume, series) = tokio::join!(
        guard.run(name, timeout, provider.get_volume_24h(&profile.id)),
        guard.run(
            name,
            timeout,
            provider.get_volume_series(&profile.id, settings.volume_window_days),
        ),
    );

    let volume = volume.and_then(|usd| {
        if usd < Decimal::ZERO {
            Err(ProviderError::invalid(name, format!("negative volume {usd}")))
        } else {
            Ok(usd)
        }
    });
    let volume = match volume {
        Ok(usd) => usd,
        Err(err) => {
            log_fallback(Component::Trading, profile, FAIL_CLOSED_POINTS, &err);
            return ComponentOutcome::fallback(FAIL_CLOSED_POINTS, TradingMeasurement::default());
        }
    };
    let volume_points = rubric::volume_points(volume);

    let coefficient = series.and_then(|samples| {
        if samples.len() < settings.min_volume_samples {
            return Err(ProviderError::InsufficientSample {
                required: settings.min_volume_samples,
                actual: samples.len(),
            });
        }
        rubric::consistency_coefficient(&samples)
            .ok_or_else(|| ProviderError::invalid(name, "volume history has no positive mean"))
    });

    let measurement = TradingMeasurement {
        volume_24h_usd: Some(volume),
        consistency_coefficient: coefficient.as_ref().ok().copied(),
    };

    match coefficient {
        Ok(cv) => {
            let consistency_points = rubric::consistency_points(cv);
            let points = rubric::trading_points(volume_points, consistency_points);
            debug!(
                asset = %profile.id,
                volume_24h_usd = %volume,
                consistency = cv,
                volume_points,
                consistency_points,
                points,
                "Trading activity collected"
            );
            ComponentOutcome::measured(points, measurement)
        }
        Err(err) => {
            let points = rubric::trading_points(volume_points, 0);
            log_fallback(Component::Trading, profile, points, &err);
            ComponentOutcome::fallback(points, measurement)
        }
    }
}

/// Peg stability, fail-open.
///
/// Both prices are requested concurrently. A missing anchor, a failed
/// lookup, or an unusable anchor price all yield the neutral mid-value.
pub async fn collect_peg(
    provider: &dyn PriceProvider,
    profile: &AssetProfile,
    settings: &ScoringSettings,
    guard: &CallGuard,
) -> ComponentOutcome<Option<Decimal>> {
    let name = provider.provider_name();
    let Some(anchor) = profile.peg_anchor.as_ref() else {
        let err = ProviderError::invalid(name, "no peg anchor configured");
        log_fallback(Component::Peg, profile, PEG_NEUTRAL_POINTS, &err);
        return ComponentOutcome::fallback(PEG_NEUTRAL_POINTS, None);
    };

    let timeout = settings.timeouts.price;
    let (price, anchor_price) = tokio::join!(
        guard.run(name, timeout, provider.get_price(&profile.id)),
        guard.run(name, timeout, provider.get_price(anchor)),
    );

    let deviation = price.and_then(|price| {
        let anchor_price = anchor_price?;
        rubric::peg_deviation_pct(price, anchor_price).ok_or_else(|| {
            ProviderError::invalid(
                name,
                format!("cannot compare price {price} against anchor {anchor_price}"),
            )
        })
    });

    match deviation {
        Ok(pct) => {
            let points = rubric::peg_points(pct);
            debug!(
                asset = %profile.id,
                anchor = %anchor,
                deviation_pct = %pct,
                points,
                "Peg collected"
            );
            ComponentOutcome::measured(points, Some(pct))
        }
        Err(err) => {
            log_fallback(Component::Peg, profile, PEG_NEUTRAL_POINTS, &err);
            ComponentOutcome::fallback(PEG_NEUTRAL_POINTS, None)
        }
    }
}
