//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`provider`] - `ScriptedMarketData`, a scripted implementation of every
//!   provider port with per-call values, errors and delays.
//! - [`domain`] - The reference profile, settings and market data.

pub mod domain;
pub mod provider;
