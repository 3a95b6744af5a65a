//! In-memory credential-profile store backed by a persistence collaborator
//!
//! Every mutation is read-modify-write: the next snapshot is persisted through
//! the [`SettingsStore`] before the in-memory state is committed. A failed save
//! leaves the in-memory state at the last committed snapshot.

use crate::core::persist::{PersistedState, SettingsStore};
use crate::models::{AppSecret, CredentialProfile};
use crate::utils::StoreError;
use std::sync::Arc;

/// Ordered collection of credential profiles plus an optional default pointer
///
/// Invariants:
/// - profile ids are unique within the store
/// - `default_profile_id`, when set, references an existing profile; removing
///   that profile clears the pointer
pub struct ProfileStore {
    profiles: Vec<CredentialProfile>,
    default_profile_id: Option<String>,
    persistence: Arc<dyn SettingsStore>,
}

impl ProfileStore {
    /// Construct the store from the persisted snapshot
    ///
    /// A dangling default pointer in the snapshot (a known inconsistency in
    /// earlier versions of the settings format) is dropped on load.
    pub async fn load(persistence: Arc<dyn SettingsStore>) -> Result<Self, StoreError> {
        let state = persistence.load().await?;

        let default_profile_id = state.default_profile_id.filter(|id| {
            let known = state.profiles.iter().any(|p| p.id() == id);
            if !known {
                log::warn!("Dropping dangling default profile pointer on load");
            }
            known
        });

        Ok(ProfileStore {
            profiles: state.profiles,
            default_profile_id,
            persistence,
        })
    }

    /// Add a profile; the new profile becomes the default when none is set
    pub async fn add(
        &mut self,
        name: &str,
        app_id: &str,
        secret: &str,
    ) -> Result<CredentialProfile, StoreError> {
        validate_fields(name, app_id, secret)?;

        let profile = CredentialProfile::new(name, app_id, AppSecret::new(secret));

        let mut profiles = self.profiles.clone();
        profiles.push(profile.clone());
        let default_profile_id = self
            .default_profile_id
            .clone()
            .or_else(|| Some(profile.id().to_string()));

        self.commit(profiles, default_profile_id).await?;
        log::info!("Added profile '{}'", profile.name());
        Ok(profile)
    }

    /// Replace the mutable fields of an existing profile in place
    pub async fn update(
        &mut self,
        id: &str,
        name: &str,
        app_id: &str,
        secret: &str,
    ) -> Result<(), StoreError> {
        let position = self.position_of(id)?;
        validate_fields(name, app_id, secret)?;

        let mut profiles = self.profiles.clone();
        profiles[position].replace_fields(name, app_id, AppSecret::new(secret));

        let default_profile_id = self.default_profile_id.clone();
        self.commit(profiles, default_profile_id).await
    }

    /// Remove a profile; clears the default pointer only when it referenced
    /// the removed id
    pub async fn remove(&mut self, id: &str) -> Result<(), StoreError> {
        let position = self.position_of(id)?;

        let mut profiles = self.profiles.clone();
        profiles.remove(position);

        let default_profile_id = self
            .default_profile_id
            .clone()
            .filter(|default| default != id);

        self.commit(profiles, default_profile_id).await
    }

    /// Set or clear the default profile pointer
    pub async fn set_default(&mut self, id: Option<&str>) -> Result<(), StoreError> {
        if let Some(id) = id {
            self.position_of(id)?;
        }

        let profiles = self.profiles.clone();
        self.commit(profiles, id.map(str::to_string)).await
    }

    /// Look up a profile by id, no side effects
    pub fn resolve(&self, id: &str) -> Option<&CredentialProfile> {
        self.profiles.iter().find(|p| p.id() == id)
    }

    /// All profiles, in insertion order
    pub fn profiles(&self) -> &[CredentialProfile] {
        &self.profiles
    }

    pub fn default_profile_id(&self) -> Option<&str> {
        self.default_profile_id.as_deref()
    }

    fn position_of(&self, id: &str) -> Result<usize, StoreError> {
        self.profiles
            .iter()
            .position(|p| p.id() == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    /// Persist the next snapshot, then commit it in memory
    async fn commit(
        &mut self,
        profiles: Vec<CredentialProfile>,
        default_profile_id: Option<String>,
    ) -> Result<(), StoreError> {
        let state = PersistedState {
            profiles,
            default_profile_id,
        };
        self.persistence.save(&state).await?;

        self.profiles = state.profiles;
        self.default_profile_id = state.default_profile_id;
        Ok(())
    }
}

fn validate_fields(name: &str, app_id: &str, secret: &str) -> Result<(), StoreError> {
    if name.trim().is_empty() {
        return Err(StoreError::Validation("Name cannot be blank".to_string()));
    }
    if app_id.trim().is_empty() {
        return Err(StoreError::Validation("AppID cannot be blank".to_string()));
    }
    if secret.trim().is_empty() {
        return Err(StoreError::Validation(
            "App secret cannot be blank".to_string(),
        ));
    }
    Ok(())
}
