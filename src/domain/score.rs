//! Composite trust score types.
//!
//! A score is the sum of six bounded components whose maxima add up to
//! exactly 100. The rounded total maps through a fixed, ordered threshold
//! table to a letter grade and a qualitative label.
//!
//! # Examples
//!
//! ```
//! use trustgrade::domain::score::{grade_for, Grade, Label};
//!
//! assert_eq!(grade_for(98), (Grade::A, Label::Excellent));
//! assert_eq!(grade_for(59), (Grade::CMinus, Label::Caution));
//! ```

use std::collections::BTreeSet;
use std::fmt;

use serde::{Serialize, Serializer};

use super::id::AssetId;
use super::metric::{Component, RawMetricSet};

/// Highest achievable total score.
pub const MAX_TOTAL_SCORE: u8 = 100;

/// Ordinal letter grade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Grade {
    APlus,
    A,
    AMinus,
    BPlus,
    B,
    BMinus,
    CPlus,
    C,
    CMinus,
}

impl Grade {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::APlus => "A+",
            Self::A => "A",
            Self::AMinus => "A-",
            Self::BPlus => "B+",
            Self::B => "B",
            Self::BMinus => "B-",
            Self::CPlus => "C+",
            Self::C => "C",
            Self::CMinus => "C-",
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Grade {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Qualitative band for a grade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Label {
    Excellent,
    Good,
    Fair,
    Adequate,
    Caution,
}

impl Label {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Excellent => "Excellent",
            Self::Good => "Good",
            Self::Fair => "Fair",
            Self::Adequate => "Adequate",
            Self::Caution => "Caution",
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

const GRADE_TABLE: [(u8, Grade, Label); 8] = [
    (95, Grade::APlus, Label::Excellent),
    (90, Grade::A, Label::Excellent),
    (85, Grade::AMinus, Label::Excellent),
    (80, Grade::BPlus, Label::Good),
    (75, Grade::B, Label::Good),
    (70, Grade::BMinus, Label::Fair),
    (65, Grade::CPlus, Label::Fair),
    (60, Grade::C, Label::Adequate),
];

/// Map a total score to its grade and label.
#[must_use]
pub fn grade_for(total: u8) -> (Grade, Label) {
    GRADE_TABLE
        .iter()
        .find(|(min, _, _)| total >= *min)
        .map_or((Grade::CMinus, Label::Caution), |(_, grade, label)| {
            (*grade, *label)
        })
}

/// Points contributed by each component.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ScoreBreakdown {
    /// Custody model of the reserve (0-25).
    pub custody_security: u8,
    /// Pooled USD liquidity (0-25).
    pub liquidity_depth: u8,
    /// Top-holder concentration (0-15).
    pub holder_distribution: u8,
    /// 24h volume plus volume consistency (0-15).
    pub trading_activity: u8,
    /// Deviation from the reference anchor price (0-10).
    pub peg_stability: u8,
    /// Redemption latency (0-10).
    pub redemption_speed: u8,
}

impl ScoreBreakdown {
    /// Points for a single component.
    #[must_use]
    pub const fn get(&self, component: Component) -> u8 {
        match component {
            Component::Custody => self.custody_security,
            Component::Liquidity => self.liquidity_depth,
            Component::Holders => self.holder_distribution,
            Component::Trading => self.trading_activity,
            Component::Peg => self.peg_stability,
            Component::Redemption => self.redemption_speed,
        }
    }

    /// Sum of all components, before rounding.
    #[must_use]
    pub fn sum(&self) -> f64 {
        [
            self.custody_security,
            self.liquidity_depth,
            self.holder_distribution,
            self.trading_activity,
            self.peg_stability,
            self.redemption_speed,
        ]
        .iter()
        .map(|points| f64::from(*points))
        .sum()
    }

    /// Rounded total, clamped to `0..=100`.
    #[must_use]
    pub fn total(&self) -> u8 {
        let rounded = self.sum().round().clamp(0.0, f64::from(MAX_TOTAL_SCORE));
        rounded as u8
    }
}

/// The complete, always-available outcome of one scoring call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreResult {
    pub asset_id: AssetId,
    pub symbol: String,
    pub total_score: u8,
    pub grade: Grade,
    pub label: Label,
    pub breakdown: ScoreBreakdown,
    /// Components that used a fallback value instead of a measurement.
    #[serde(serialize_with = "serialize_degraded")]
    pub degraded: BTreeSet<Component>,
    /// Measurements that were actually obtained.
    pub metrics: RawMetricSet,
}

impl ScoreResult {
    /// Aggregate a breakdown into a result.
    #[must_use]
    pub fn from_breakdown(
        asset_id: AssetId,
        symbol: impl Into<String>,
        breakdown: ScoreBreakdown,
        degraded: BTreeSet<Component>,
        metrics: RawMetricSet,
    ) -> Self {
        let total_score = breakdown.total();
        let (grade, label) = grade_for(total_score);
        Self {
            asset_id,
            symbol: symbol.into(),
            total_score,
            grade,
            label,
            breakdown,
            degraded,
            metrics,
        }
    }

    /// True when any component used a fallback.
    #[must_use]
    pub fn is_degraded(&self) -> bool {
        !self.degraded.is_empty()
    }

    /// True when `component` used a fallback.
    #[must_use]
    pub fn is_component_degraded(&self, component: Component) -> bool {
        self.degraded.contains(&component)
    }
}

fn serialize_degraded<S: Serializer>(
    degraded: &BTreeSet<Component>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_seq(degraded.iter().map(Component::as_str))
}
