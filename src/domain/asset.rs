//! Static asset metadata used by the pure scoring components.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::id::AssetId;

/// Who controls the reserve backing a wrapped asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CustodyType {
    /// A single entity holds the underlying reserve.
    Centralized,
    /// A distributed quorum holds the underlying reserve.
    Decentralized,
}

impl CustodyType {
    /// Lowercase name used in configuration and output.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Centralized => "centralized",
            Self::Decentralized => "decentralized",
        }
    }
}

impl fmt::Display for CustodyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Configured metadata for one scorable asset.
///
/// Supplied by configuration and immutable for the lifetime of a scoring call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetProfile {
    /// Stable identifier passed to every provider.
    pub id: AssetId,
    /// Display symbol, for output only.
    pub symbol: String,
    /// Custody model of the underlying reserve.
    pub custody: CustodyType,
    /// Name of the custodian (or bridge/quorum for decentralized custody).
    pub custodian: String,
    /// Typical time to redeem for the underlying, in hours.
    pub redemption_latency_hours: f64,
    /// Reference asset of the same class whose price anchors the peg check.
    #[serde(default)]
    pub peg_anchor: Option<AssetId>,
}

impl AssetProfile {
    /// Create a profile without a peg anchor.
    pub fn new(
        id: impl Into<AssetId>,
        symbol: impl Into<String>,
        custody: CustodyType,
        custodian: impl Into<String>,
        redemption_latency_hours: f64,
    ) -> Self {
        Self {
            id: id.into(),
            symbol: symbol.into(),
            custody,
            custodian: custodian.into(),
            redemption_latency_hours,
            peg_anchor: None,
        }
    }

    /// Set the reference anchor used for peg deviation.
    #[must_use]
    pub fn with_peg_anchor(mut self, anchor: impl Into<AssetId>) -> Self {
        self.peg_anchor = Some(anchor.into());
        self
    }
}
