//! Inbound (driving) ports consumed by inbound adapters.
//!
//! - [`scoring`]: the trust scoring use case driven by the CLI

pub mod scoring;
