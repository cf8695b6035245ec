//! Registry of scorable assets keyed by stable identifier.

use std::collections::BTreeMap;

use crate::domain::{asset::AssetProfile, id::AssetId};
use crate::error::{ConfigError, Error, Result};

/// Configured asset profiles, keyed by [`AssetId`].
///
/// Iteration order is by id, so listings are stable across runs.
#[derive(Debug, Clone, Default)]
pub struct AssetRegistry {
    profiles: BTreeMap<AssetId, AssetProfile>,
}

impl AssetRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry, rejecting duplicate ids.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::DuplicateAsset`] on the first repeated id.
    pub fn from_profiles(profiles: impl IntoIterator<Item = AssetProfile>) -> Result<Self> {
        let mut registry = Self::new();
        for profile in profiles {
            registry.insert(profile)?;
        }
        Ok(registry)
    }

    /// Register a profile.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::DuplicateAsset`] if the id is already registered.
    pub fn insert(&mut self, profile: AssetProfile) -> Result<()> {
        if self.profiles.contains_key(&profile.id) {
            return Err(ConfigError::DuplicateAsset(profile.id).into());
        }
        self.profiles.insert(profile.id.clone(), profile);
        Ok(())
    }

    /// Look up a profile.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownAsset`] when nothing is registered under `id`.
    pub fn get(&self, id: &AssetId) -> Result<&AssetProfile> {
        self.profiles
            .get(id)
            .ok_or_else(|| Error::UnknownAsset(id.clone()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &AssetProfile> {
        self.profiles.values()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}
