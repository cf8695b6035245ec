//! Market-data provider selection.

use std::path::PathBuf;

use serde::Deserialize;

use crate::adapter::outbound::http::settings::HttpProviderConfig;

/// `[provider]` section. The active backend is chosen by `type`.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ProviderConfig {
    /// REST JSON market-data API.
    Http(HttpProviderConfig),
    /// Frozen values from a snapshot file.
    Snapshot(SnapshotProviderConfig),
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self::Http(HttpProviderConfig::default())
    }
}

impl ProviderConfig {
    /// Backend name for logging.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Http(_) => "http",
            Self::Snapshot(_) => "snapshot",
        }
    }
}

/// Snapshot backend settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SnapshotProviderConfig {
    /// Snapshot file, relative to the working directory.
    #[serde(default)]
    pub path: PathBuf,
}
