//! Raw measurements gathered for a single scoring call.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One of the six scored components.
///
/// Ordering follows declaration order, which keeps the serialized
/// `degraded` list stable across runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Component {
    Custody,
    Liquidity,
    Holders,
    Trading,
    Peg,
    Redemption,
}

impl Component {
    /// Every component, in breakdown order.
    pub const ALL: [Self; 6] = [
        Self::Custody,
        Self::Liquidity,
        Self::Holders,
        Self::Trading,
        Self::Peg,
        Self::Redemption,
    ];

    /// Lowercase component name used in logs and output.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Custody => "custody",
            Self::Liquidity => "liquidity",
            Self::Holders => "holders",
            Self::Trading => "trading",
            Self::Peg => "peg",
            Self::Redemption => "redemption",
        }
    }

    /// Maximum points this component can contribute.
    #[must_use]
    pub const fn max_points(&self) -> u8 {
        match self {
            Self::Custody | Self::Liquidity => 25,
            Self::Holders | Self::Trading => 15,
            Self::Peg | Self::Redemption => 10,
        }
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single ranked holder returned by a holder provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HolderBalance {
    pub address: String,
    pub balance: Decimal,
}

impl HolderBalance {
    pub fn new(address: impl Into<String>, balance: Decimal) -> Self {
        Self {
            address: address.into(),
            balance,
        }
    }
}

/// Measurements obtained during one scoring call.
///
/// Each field is `None` when the measurement could not be obtained. Never
/// cached; staleness is the provider's concern.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RawMetricSet {
    /// Aggregate USD liquidity across venues.
    pub liquidity_usd: Option<Decimal>,
    /// Largest holder's share of the sampled top-N supply, 0-100.
    pub holder_concentration_pct: Option<Decimal>,
    /// Trailing 24h USD volume.
    pub volume_24h_usd: Option<Decimal>,
    /// Coefficient of variation of the trailing volume history.
    pub volume_consistency_coefficient: Option<f64>,
    /// Relative deviation from the peg anchor, in percent.
    pub price_deviation_pct: Option<Decimal>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn components_serialize_lowercase() {
        let json = serde_json::to_string(&Component::ALL).unwrap();
        assert_eq!(
            json,
            r#"["custody","liquidity","holders","trading","peg","redemption"]"#
        );
    }
}
