//! Pure normalizers that turn raw measurements into component points.
//!
//! Every table here is read-only for the life of the process. Threshold
//! tables come in two shapes:
//!
//! - "at least" tables (liquidity, volume): the first row whose inclusive
//!   lower bound the value reaches wins; higher values score higher.
//! - "below" tables (holders, consistency, peg): the first row whose
//!   exclusive upper bound the value stays under wins; lower values score
//!   higher.
//!
//! # Examples
//!
//! ```
//! use trustgrade::domain::rubric::{liquidity_points, peg_points};
//! use rust_decimal_macros::dec;
//!
//! assert_eq!(liquidity_points(dec!(12_000_000)), 25);
//! assert_eq!(peg_points(dec!(0.1)), 10);
//! ```

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::asset::CustodyType;
use super::metric::HolderBalance;

/// Points awarded to a component whose data is missing under a fail-closed policy.
pub const FAIL_CLOSED_POINTS: u8 = 0;

/// Neutral peg points used when a price feed is unavailable (fail-open).
pub const PEG_NEUTRAL_POINTS: u8 = 5;

/// Cap for the combined trading activity component.
pub const TRADING_MAX_POINTS: u8 = 15;

const LIQUIDITY_TABLE: [(Decimal, u8); 7] = [
    (dec!(10_000_000), 25),
    (dec!(5_000_000), 22),
    (dec!(2_000_000), 19),
    (dec!(1_000_000), 16),
    (dec!(500_000), 12),
    (dec!(250_000), 8),
    (dec!(100_000), 5),
];
const LIQUIDITY_FLOOR: u8 = 2;

const HOLDER_TABLE: [(Decimal, u8); 5] = [
    (dec!(5), 15),
    (dec!(10), 13),
    (dec!(15), 11),
    (dec!(25), 8),
    (dec!(40), 5),
];
const HOLDER_FLOOR: u8 = 2;

const VOLUME_TABLE: [(Decimal, u8); 5] = [
    (dec!(1_000_000), 10),
    (dec!(500_000), 8),
    (dec!(250_000), 6),
    (dec!(100_000), 4),
    (dec!(50_000), 2),
];
const VOLUME_FLOOR: u8 = 0;

const CONSISTENCY_TABLE: [(f64, u8); 5] = [(0.3, 5), (0.5, 4), (0.8, 3), (1.2, 2), (2.0, 1)];
const CONSISTENCY_FLOOR: u8 = 0;

const PEG_TABLE: [(Decimal, u8); 5] = [
    (dec!(0.25), 10),
    (dec!(0.5), 9),
    (dec!(1.0), 7),
    (dec!(2.0), 5),
    (dec!(3.0), 3),
];
const PEG_FLOOR: u8 = 1;

const REDEMPTION_TABLE: [(f64, u8); 4] = [(1.0, 10), (6.0, 8), (24.0, 6), (72.0, 4)];
const REDEMPTION_FLOOR: u8 = 2;

/// Custodians whose centralized custody earns the higher centralized tier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrustedCustodians {
    names: Vec<String>,
}

impl TrustedCustodians {
    /// Build a trust list. Matching is case-insensitive and ignores
    /// surrounding whitespace.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            names: names
                .into_iter()
                .map(|name| name.as_ref().trim().to_lowercase())
                .filter(|name| !name.is_empty())
                .collect(),
        }
    }

    /// True when `custodian` is on the list.
    #[must_use]
    pub fn contains(&self, custodian: &str) -> bool {
        let needle = custodian.trim().to_lowercase();
        self.names.iter().any(|name| *name == needle)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl Default for TrustedCustodians {
    fn default() -> Self {
        Self::new(default_trusted_custodians())
    }
}

/// Custodian names trusted out of the box.
#[must_use]
pub fn default_trusted_custodians() -> Vec<String> {
    ["BitGo", "Coinbase Custody", "Anchorage Digital", "Fireblocks"]
        .into_iter()
        .map(String::from)
        .collect()
}

/// Custody security points (max 25).
#[must_use]
pub fn custody_points(custody: CustodyType, custodian: &str, trusted: &TrustedCustodians) -> u8 {
    match custody {
        CustodyType::Decentralized => 25,
        CustodyType::Centralized if trusted.contains(custodian) => 20,
        CustodyType::Centralized => 15,
    }
}

/// Redemption speed points (max 10). Non-finite latencies fall to the floor.
#[must_use]
pub fn redemption_points(latency_hours: f64) -> u8 {
    REDEMPTION_TABLE
        .iter()
        .find(|(limit, _)| latency_hours <= *limit)
        .map_or(REDEMPTION_FLOOR, |(_, points)| *points)
}

/// Liquidity depth points (max 25) for aggregate USD liquidity.
#[must_use]
pub fn liquidity_points(liquidity_usd: Decimal) -> u8 {
    at_least(liquidity_usd, &LIQUIDITY_TABLE, LIQUIDITY_FLOOR)
}

/// Largest holder's share of the sampled balances, in percent.
///
/// Returns `None` when no holders were sampled, a balance is negative, or the
/// sampled balances do not sum to a positive amount within `Decimal` range.
/// The denominator is the sampled top-N supply, not circulating supply.
#[must_use]
pub fn holder_concentration_pct(holders: &[HolderBalance]) -> Option<Decimal> {
    if holders.iter().any(|h| h.balance < Decimal::ZERO) {
        return None;
    }
    let total = holders
        .iter()
        .try_fold(Decimal::ZERO, |sum, h| sum.checked_add(h.balance))?;
    if total <= Decimal::ZERO {
        return None;
    }
    let largest = holders.iter().map(|h| h.balance).max()?;
    largest.checked_div(total)?.checked_mul(dec!(100))
}

/// Holder distribution points (max 15) for a concentration percentage.
#[must_use]
pub fn holder_points(concentration_pct: Decimal) -> u8 {
    below(concentration_pct, &HOLDER_TABLE, HOLDER_FLOOR)
}

/// Volume sub-score (max 10) for 24h USD volume.
#[must_use]
pub fn volume_points(volume_24h_usd: Decimal) -> u8 {
    at_least(volume_24h_usd, &VOLUME_TABLE, VOLUME_FLOOR)
}

/// Coefficient of variation (population std-dev / mean) of a volume history.
///
/// Returns `None` for an empty history, a non-positive mean, or samples that
/// do not fit in an `f64`.
#[must_use]
pub fn consistency_coefficient(samples: &[Decimal]) -> Option<f64> {
    if samples.is_empty() {
        return None;
    }
    let values = samples
        .iter()
        .map(ToPrimitive::to_f64)
        .collect::<Option<Vec<f64>>>()?;

    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    if !mean.is_finite() || mean <= 0.0 {
        return None;
    }
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    let cv = variance.sqrt() / mean;
    cv.is_finite().then_some(cv)
}

/// Consistency sub-score (max 5) for a coefficient of variation.
#[must_use]
pub fn consistency_points(coefficient: f64) -> u8 {
    CONSISTENCY_TABLE
        .iter()
        .find(|(limit, _)| coefficient < *limit)
        .map_or(CONSISTENCY_FLOOR, |(_, points)| *points)
}

/// Trading activity points: volume plus consistency, capped at 15.
#[must_use]
pub fn trading_points(volume: u8, consistency: u8) -> u8 {
    volume.saturating_add(consistency).min(TRADING_MAX_POINTS)
}

/// `|price - anchor| / anchor * 100`.
///
/// Returns `None` when the anchor is not positive, the price is negative, or
/// the ratio does not fit in a `Decimal`.
#[must_use]
pub fn peg_deviation_pct(price: Decimal, anchor_price: Decimal) -> Option<Decimal> {
    if anchor_price <= Decimal::ZERO || price < Decimal::ZERO {
        return None;
    }
    price
        .checked_sub(anchor_price)?
        .abs()
        .checked_div(anchor_price)?
        .checked_mul(dec!(100))
}

/// Peg stability points (max 10) for a deviation percentage.
#[must_use]
pub fn peg_points(deviation_pct: Decimal) -> u8 {
    below(deviation_pct, &PEG_TABLE, PEG_FLOOR)
}

fn at_least(value: Decimal, table: &[(Decimal, u8)], floor: u8) -> u8 {
    table
        .iter()
        .find(|(bound, _)| value >= *bound)
        .map_or(floor, |(_, points)| *points)
}

fn below(value: Decimal, table: &[(Decimal, u8)], floor: u8) -> u8 {
    table
        .iter()
        .find(|(bound, _)| value < *bound)
        .map_or(floor, |(_, points)| *points)
}
