//! WeChat mini-program link exchange over the platform HTTP API
//!
//! One `generate_urllink` call per item, authenticated by a stable access
//! token. Tokens are cached per app id in memory and persisted to
//! `token_cache.json`; a cached token is reused while more than
//! [`TOKEN_REFRESH_MARGIN_SECS`] of validity remain.
//!
//! SECURITY: The app secret and the access token never appear in log output
//! or error messages.

use crate::constants::{
    DEFAULT_TOKEN_TTL_SECS, HTTP_TIMEOUT_SECS, STABLE_TOKEN_URL, TOKEN_CACHE_FILE_NAME,
    TOKEN_REFRESH_MARGIN_SECS, URL_LINK_URL,
};
use crate::core::exchange::LinkExchange;
use crate::models::{AppSecret, EnvVariant};
use crate::utils::ExchangeError;
use async_trait::async_trait;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

#[derive(Debug, Clone, Serialize, Deserialize)]
struct TokenCacheEntry {
    appid: String,
    token: String,
    /// Expiry as Unix seconds, already reduced by the refresh margin
    expires_at: u64,
}

#[derive(Deserialize)]
struct WechatTokenResponse {
    access_token: Option<String>,
    expires_in: Option<u64>,
    errmsg: Option<String>,
}

#[derive(Deserialize)]
struct WechatUrlLinkResponse {
    url_link: Option<String>,
    err_msg: Option<String>,
}

pub struct WechatLinkExchange {
    client: reqwest::Client,
    token_cache: Mutex<Option<TokenCacheEntry>>,
    cache_path: Option<PathBuf>,
    token_url: String,
    link_url: String,
}

impl WechatLinkExchange {
    /// Exchange with the on-disk token cache in the per-user config directory
    pub fn new() -> Self {
        let cache_path = ProjectDirs::from("", "", crate::constants::APP_NAME)
            .map(|dirs| dirs.config_dir().join(TOKEN_CACHE_FILE_NAME));
        Self::build(cache_path)
    }

    /// Exchange with an explicit token-cache path (tests, portable mode)
    pub fn with_cache_path(path: PathBuf) -> Self {
        Self::build(Some(path))
    }

    /// Exchange that keeps tokens in memory only
    pub fn without_disk_cache() -> Self {
        Self::build(None)
    }

    fn build(cache_path: Option<PathBuf>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        WechatLinkExchange {
            client,
            token_cache: Mutex::new(None),
            cache_path,
            token_url: STABLE_TOKEN_URL.to_string(),
            link_url: URL_LINK_URL.to_string(),
        }
    }

    /// Point the exchange at alternate endpoints (tests)
    #[cfg(test)]
    fn with_endpoints(mut self, token_url: &str, link_url: &str) -> Self {
        self.token_url = token_url.to_string();
        self.link_url = link_url.to_string();
        self
    }

    /// Fetch or reuse the stable access token for one app id
    async fn access_token(
        &self,
        app_id: &str,
        secret: &AppSecret,
    ) -> Result<String, ExchangeError> {
        let now = unix_now();

        if let Some(token) = self.cached_token(app_id, now) {
            return Ok(token);
        }

        log::debug!("Requesting stable access token");
        let body = serde_json::json!({
            "grant_type": "client_credential",
            "appid": app_id,
            "secret": secret.as_str(),
        });

        let response = self
            .client
            .post(&self.token_url)
            .json(&body)
            .send()
            .await
            .map_err(|e| transport_error("Token request failed", e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ExchangeError::Status(status.as_u16()));
        }

        let text = response
            .text()
            .await
            .map_err(|e| transport_error("Failed to read token response", e))?;

        let parsed: WechatTokenResponse = serde_json::from_str(&text)
            .map_err(|e| ExchangeError::Malformed(format!("Token response: {}", e)))?;

        let token = parsed.access_token.ok_or_else(|| {
            ExchangeError::Api(format!(
                "Token request rejected: {}",
                parsed.errmsg.unwrap_or_else(|| "unknown error".to_string())
            ))
        })?;

        let expires_in = parsed.expires_in.unwrap_or(DEFAULT_TOKEN_TTL_SECS);
        let entry = TokenCacheEntry {
            appid: app_id.to_string(),
            token: token.clone(),
            expires_at: now + expires_in.saturating_sub(TOKEN_REFRESH_MARGIN_SECS),
        };
        self.store_token(entry);

        Ok(token)
    }

    /// Check the in-memory cache, then the disk cache
    fn cached_token(&self, app_id: &str, now: u64) -> Option<String> {
        {
            let cache = self.lock_cache();
            if let Some(entry) = cache.as_ref() {
                if entry_is_fresh(entry, app_id, now) {
                    return Some(entry.token.clone());
                }
            }
        }

        let path = self.cache_path.as_ref()?;
        let entry = load_disk_cache(path)?;
        if entry_is_fresh(&entry, app_id, now) {
            let token = entry.token.clone();
            *self.lock_cache() = Some(entry);
            return Some(token);
        }
        None
    }

    fn store_token(&self, entry: TokenCacheEntry) {
        if let Some(path) = &self.cache_path {
            save_disk_cache(path, &entry);
        }
        *self.lock_cache() = Some(entry);
    }

    fn lock_cache(&self) -> std::sync::MutexGuard<'_, Option<TokenCacheEntry>> {
        self.token_cache.lock().unwrap_or_else(|poisoned| {
            log::warn!("Recovered from poisoned token-cache mutex - previous thread panicked");
            poisoned.into_inner()
        })
    }
}

impl Default for WechatLinkExchange {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LinkExchange for WechatLinkExchange {
    async fn exchange(
        &self,
        app_id: &str,
        secret: &AppSecret,
        env: EnvVariant,
        path: &str,
        query: &str,
    ) -> Result<String, ExchangeError> {
        let token = self.access_token(app_id, secret).await?;

        let body = serde_json::json!({
            "path": path,
            "query": query,
            "env_version": env.as_str(),
        });

        let response = self
            .client
            .post(format!("{}?access_token={}", self.link_url, token))
            .json(&body)
            .send()
            .await
            .map_err(|e| transport_error("URL Link request failed", e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ExchangeError::Status(status.as_u16()));
        }

        let text = response
            .text()
            .await
            .map_err(|e| transport_error("Failed to read response", e))?;

        let parsed: WechatUrlLinkResponse = serde_json::from_str(&text)
            .map_err(|e| ExchangeError::Malformed(format!("URL Link response: {}", e)))?;

        match parsed.url_link {
            Some(link) if !link.is_empty() => Ok(link),
            _ => Err(ExchangeError::Api(
                parsed
                    .err_msg
                    .unwrap_or_else(|| "unknown error".to_string()),
            )),
        }
    }
}

/// Format a reqwest failure without its request URL
///
/// The URL Link endpoint carries the live access token as a query parameter,
/// and transport error messages flow into user-visible results and the
/// remote report payload.
fn transport_error(context: &str, e: reqwest::Error) -> ExchangeError {
    ExchangeError::Transport(format!("{}: {}", context, e.without_url()))
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}

/// A cache entry is fresh when it matches the app id and still has more than
/// the refresh margin's worth of validity (the margin was already subtracted
/// when the entry was stored)
fn entry_is_fresh(entry: &TokenCacheEntry, app_id: &str, now: u64) -> bool {
    entry.appid == app_id && entry.expires_at > now
}

fn load_disk_cache(path: &PathBuf) -> Option<TokenCacheEntry> {
    if !path.exists() {
        return None;
    }
    let contents = fs::read_to_string(path).ok()?;
    serde_json::from_str(&contents).ok()
}

/// Best-effort write; a failed cache write only costs an extra token fetch
fn save_disk_cache(path: &PathBuf, entry: &TokenCacheEntry) {
    if let Some(parent) = path.parent() {
        let _ = fs::create_dir_all(parent);
    }
    if let Ok(contents) = serde_json::to_string_pretty(entry) {
        let _ = fs::write(path, contents);
    }
}
