//! Deep-link exchange abstraction over the mini-program platform API
//!
//! This trait allows testing without real platform credentials by supporting
//! mock implementations. The reqwest-backed implementation is in
//! `src/platform/`.

use crate::models::{AppSecret, EnvVariant};
use crate::utils::ExchangeError;
use async_trait::async_trait;

/// One deep-link exchange call per request item
///
/// Implementations own any token acquisition/caching they need; a token
/// failure must surface as an [`ExchangeError`] for the item that triggered
/// it, never as a process-level fault.
#[async_trait]
pub trait LinkExchange: Send + Sync {
    /// Exchange one (path, query) descriptor for a shareable deep link
    ///
    /// # Security
    /// - `secret` MUST NOT appear in logs or error messages
    async fn exchange(
        &self,
        app_id: &str,
        secret: &AppSecret,
        env: EnvVariant,
        path: &str,
        query: &str,
    ) -> Result<String, ExchangeError>;
}
