//! Reference profile, settings and market data used across tests.
//!
//! The reference asset is decentralized with a 6h redemption latency and,
//! with [`reference_metrics`], measures:
//! liquidity $12M, concentration 3%, 24h volume $1.2M, consistency < 0.3,
//! peg deviation 0.1%. That scores 98 (A, Excellent) with nothing degraded.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::provider::{Reply, ScriptedMarketData};
use crate::application::scoring::settings::ScoringSettings;
use crate::domain::{
    asset::{AssetProfile, CustodyType},
    metric::HolderBalance,
};

/// Decentralized asset with a peg anchor and a 6h redemption latency.
#[must_use]
pub fn reference_profile() -> AssetProfile {
    AssetProfile::new(
        "tbtc-mint",
        "tBTC",
        CustodyType::Decentralized,
        "Threshold Network",
        6.0,
    )
    .with_peg_anchor("wbtc-mint")
}

/// Default settings with a holder sample wide enough for a 3% top holder.
///
/// With sampled-supply concentration, `n` holders can never show less than
/// `100 / n` percent, so the default sample of 20 bottoms out at 5%.
#[must_use]
pub fn reference_settings() -> ScoringSettings {
    ScoringSettings {
        holder_sample_size: 50,
        ..ScoringSettings::default()
    }
}

/// 34 holders: thirty-three at 3 and one at 1. Largest share is 3%.
#[must_use]
pub fn reference_holders() -> Vec<HolderBalance> {
    let mut holders = vec![HolderBalance::new("holder-0", dec!(3))];
    holders.extend((1..=32).map(|i| HolderBalance::new(format!("holder-{i}"), dec!(3))));
    holders.push(HolderBalance::new("holder-33", dec!(1)));
    holders
}

/// Ten days of steady volume around $1M.
#[must_use]
pub fn reference_volume_series() -> Vec<Decimal> {
    [1_000, 1_100, 900, 1_050, 950, 1_000, 1_200, 980, 1_020, 1_000]
        .into_iter()
        .map(|thousands| Decimal::from(thousands) * dec!(1_000))
        .collect()
}

/// Scripted data that scores `profile` as the reference asset.
#[must_use]
pub fn reference_metrics(profile: &AssetProfile) -> ScriptedMarketData {
    let mut data = ScriptedMarketData::new()
        .with_price(&profile.id, Reply::ok(dec!(100.1)))
        .with_liquidity(Reply::ok(dec!(12_000_000)))
        .with_holders(Reply::ok(reference_holders()))
        .with_volume_24h(Reply::ok(dec!(1_200_000)))
        .with_volume_series(Reply::ok(reference_volume_series()));
    if let Some(anchor) = &profile.peg_anchor {
        data = data.with_price(anchor, Reply::ok(dec!(100)));
    }
    data
}
