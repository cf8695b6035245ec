//! Infrastructure configuration modules.

pub mod logging;
pub mod provider;
pub mod scoring;
pub mod settings;
