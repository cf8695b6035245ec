//! Scoring use case exposed to inbound adapters.

use async_trait::async_trait;

use crate::domain::{asset::AssetProfile, id::AssetId, score::ScoreResult};
use crate::error::Result;

/// Trust scoring for registered assets.
#[async_trait]
pub trait TrustScoring: Send + Sync {
    /// Score a registered asset.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::Error::UnknownAsset`] when no profile is
    /// registered for `asset`. Provider failures never surface here; they
    /// degrade the result instead.
    async fn score_asset(&self, asset: &AssetId) -> Result<ScoreResult>;

    /// Score several registered assets concurrently.
    ///
    /// Results are returned in request order; an unknown id fails only its
    /// own entry.
    async fn score_assets(&self, assets: &[AssetId]) -> Vec<Result<ScoreResult>>;

    /// All registered profiles, ordered by asset id.
    fn assets(&self) -> Vec<AssetProfile>;
}
