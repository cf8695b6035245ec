//! Outbound ports (driven side): interfaces implemented by outbound adapters.
//!
//! These contracts describe the market-data collaborators the scoring engine
//! depends on.

pub mod provider;
