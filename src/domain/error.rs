//! Provider failure taxonomy.
//!
//! Every variant is caught at the collector boundary and converted into the
//! component's fallback value plus a degraded marker. None of them ever
//! reaches a caller of the scoring operation.
//!
//! # Examples
//!
//! ```
//! use trustgrade::domain::error::ProviderError;
//!
//! let err = ProviderError::Timeout { provider: "liquidity" };
//! assert_eq!(err.kind(), "timeout");
//! assert_eq!(err.to_string(), "liquidity provider timed out");
//! ```

use thiserror::Error;

/// Failure of a single provider call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    /// The call did not finish within its per-call timeout or the overall deadline.
    #[error("{provider} provider timed out")]
    Timeout {
        /// Provider that was called.
        provider: &'static str,
    },

    /// The scoring call was cancelled while this call was in flight.
    #[error("{provider} call cancelled")]
    Cancelled {
        /// Provider that was called.
        provider: &'static str,
    },

    /// Network or HTTP failure.
    #[error("{provider} provider unavailable: {reason}")]
    Unavailable {
        /// Provider that was called.
        provider: &'static str,
        /// Underlying transport failure.
        reason: String,
    },

    /// The provider answered with a malformed or nonsensical value.
    #[error("{provider} provider returned invalid data: {reason}")]
    DataInvalid {
        /// Provider that was called.
        provider: &'static str,
        /// What was wrong with the payload.
        reason: String,
    },

    /// A history was shorter than the required window.
    #[error("insufficient sample: need {required}, got {actual}")]
    InsufficientSample {
        /// Minimum sample count.
        required: usize,
        /// Samples actually returned.
        actual: usize,
    },
}

impl ProviderError {
    /// Build an [`ProviderError::Unavailable`] from any displayable error.
    pub fn unavailable(provider: &'static str, reason: impl ToString) -> Self {
        Self::Unavailable {
            provider,
            reason: reason.to_string(),
        }
    }

    /// Build a [`ProviderError::DataInvalid`] from any displayable reason.
    pub fn invalid(provider: &'static str, reason: impl ToString) -> Self {
        Self::DataInvalid {
            provider,
            reason: reason.to_string(),
        }
    }

    /// Short machine-friendly kind, used as a structured log field.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Timeout { .. } => "timeout",
            Self::Cancelled { .. } => "cancelled",
            Self::Unavailable { .. } => "unavailable",
            Self::DataInvalid { .. } => "data_invalid",
            Self::InsufficientSample { .. } => "insufficient_sample",
        }
    }
}
