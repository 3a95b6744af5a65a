//! Credential-profile types for mini-program applications
//!
//! SECURITY: `AppSecret` zeros its memory on drop and never reveals its
//! content through Debug output.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// App secret that zeros memory on drop
///
/// SECURITY: This type never implements Display or Debug in a way that reveals
/// the secret. Serialization to the persisted settings snapshot is intentional;
/// the snapshot lives in the per-user config directory.
pub struct AppSecret(String);

impl Clone for AppSecret {
    fn clone(&self) -> Self {
        AppSecret(self.0.clone())
    }
}

impl AppSecret {
    /// Create a new app secret
    pub fn new(secret: impl Into<String>) -> Self {
        AppSecret(secret.into())
    }

    /// Get the secret as a string slice
    ///
    /// Use this sparingly and only when necessary for API calls.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Get the length of the secret
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if the secret is empty
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Drop for AppSecret {
    fn drop(&mut self) {
        // Zero the memory
        // SAFETY: We own this String and are zeroing it before drop
        unsafe {
            let bytes = self.0.as_bytes_mut();
            for byte in bytes {
                std::ptr::write_volatile(byte, 0);
            }
        }
    }
}

impl fmt::Debug for AppSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // SECURITY: Never reveal the secret content
        write!(f, "AppSecret(*** {} bytes ***)", self.0.len())
    }
}

impl Serialize for AppSecret {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for AppSecret {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(AppSecret::new)
    }
}

/// A named credential set for one external mini-program application
///
/// `id` and `created_at` are fixed at creation; `name`, `app_id` and `secret`
/// are replaced in place by store updates.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CredentialProfile {
    id: String,
    name: String,
    app_id: String,
    secret: AppSecret,
    created_at: DateTime<Utc>,
}

impl CredentialProfile {
    /// Create a new profile with a fresh id and creation timestamp
    pub fn new(
        name: impl Into<String>,
        app_id: impl Into<String>,
        secret: AppSecret,
    ) -> Self {
        CredentialProfile {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            app_id: app_id.into(),
            secret,
            created_at: Utc::now(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn app_id(&self) -> &str {
        &self.app_id
    }

    pub fn secret(&self) -> &AppSecret {
        &self.secret
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Replace the mutable fields, preserving id and created_at
    pub(crate) fn replace_fields(
        &mut self,
        name: impl Into<String>,
        app_id: impl Into<String>,
        secret: AppSecret,
    ) {
        self.name = name.into();
        self.app_id = app_id.into();
        self.secret = secret;
    }
}

/// Deployment channel tag passed opaquely to the link-exchange call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnvVariant {
    Release,
    Develop,
    Trial,
}

impl EnvVariant {
    /// Wire representation expected by the platform API (`env_version` field)
    pub fn as_str(&self) -> &'static str {
        match self {
            EnvVariant::Release => "release",
            EnvVariant::Develop => "develop",
            EnvVariant::Trial => "trial",
        }
    }
}

impl fmt::Display for EnvVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for EnvVariant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "release" => Ok(EnvVariant::Release),
            "develop" => Ok(EnvVariant::Develop),
            "trial" => Ok(EnvVariant::Trial),
            other => Err(format!("Unknown environment variant: {}", other)),
        }
    }
}
