//! Implementations of ports (hexagonal adapters).
//!
//! - [`inbound`] - Driving adapters (CLI)
//! - [`outbound`] - Driven adapters (market-data providers)

pub mod inbound;
pub mod outbound;
