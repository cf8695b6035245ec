//! Runtime parameters of the scoring engine.

use std::time::Duration;

use crate::domain::rubric::TrustedCustodians;

/// Per-provider call timeouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProviderTimeouts {
    pub price: Duration,
    pub liquidity: Duration,
    pub holders: Duration,
    pub volume: Duration,
}

impl Default for ProviderTimeouts {
    fn default() -> Self {
        Self {
            price: Duration::from_secs(3),
            liquidity: Duration::from_secs(4),
            holders: Duration::from_secs(5),
            volume: Duration::from_secs(4),
        }
    }
}

/// Parameters shared by every scoring call of one engine.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoringSettings {
    /// Number of top holders requested for the concentration estimate.
    pub holder_sample_size: usize,
    /// Trailing window requested from the volume history provider.
    pub volume_window_days: u32,
    /// Minimum history length before a consistency coefficient is computed.
    pub min_volume_samples: usize,
    /// Custodians eligible for the trusted centralized tier.
    pub trusted_custodians: TrustedCustodians,
    pub timeouts: ProviderTimeouts,
    /// Overall deadline for one scoring call, on top of the per-call timeouts.
    pub deadline: Option<Duration>,
}

impl Default for ScoringSettings {
    fn default() -> Self {
        Self {
            holder_sample_size: 20,
            volume_window_days: 30,
            min_volume_samples: 7,
            trusted_custodians: TrustedCustodians::default(),
            timeouts: ProviderTimeouts::default(),
            deadline: None,
        }
    }
}
