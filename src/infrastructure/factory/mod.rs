//! Factory functions for building infrastructure components.
//!
//! Constructs fully-configured components from application configuration.
//!
//! - [`provider`] - Market-data provider construction
//! - [`scoring`] - Scoring engine construction

pub mod provider;
pub mod scoring;
