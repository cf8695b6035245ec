//! REST market-data adapter.

pub mod client;
pub mod dto;
pub mod settings;
