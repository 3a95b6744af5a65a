//! Settings-persistence trait for the credential-profile store
//!
//! This trait allows testing without touching the filesystem by supporting
//! mock implementations. The concrete JSON-file implementation is in
//! `src/platform/`.

use crate::models::CredentialProfile;
use crate::utils::StoreError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// The full persisted snapshot of the profile store
///
/// Insertion order of `profiles` is preserved across save/load cycles.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PersistedState {
    #[serde(default)]
    pub profiles: Vec<CredentialProfile>,
    #[serde(default)]
    pub default_profile_id: Option<String>,
}

/// Opaque settings persistence collaborator
///
/// The store treats this as a whole-snapshot read/write pair: every mutation
/// saves the complete next state before the in-memory state is committed.
#[async_trait]
pub trait SettingsStore: Send + Sync {
    /// Load the persisted snapshot
    ///
    /// Implementations return a default (empty) state when nothing has been
    /// saved yet; a missing file is not an error.
    async fn load(&self) -> Result<PersistedState, StoreError>;

    /// Save the snapshot, replacing any previous one
    async fn save(&self, state: &PersistedState) -> Result<(), StoreError>;
}
