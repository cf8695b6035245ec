//! Trust scoring use case.
//!
//! - [`engine`] - `ScoringEngine`, the orchestrator and aggregator
//! - [`collector`] - Provider-backed collectors and their failure policies
//! - [`guard`] - Per-call timeouts, overall deadline and cancellation
//! - [`settings`] - Engine parameters

pub mod collector;
pub mod engine;
pub mod guard;
pub mod settings;
