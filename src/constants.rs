//! # Application-Wide Constants
//!
//! Centralized configuration values and magic numbers used throughout minilink.
//!
//! Constants are defined here (rather than scattered across modules) to keep a
//! single source of truth and make the WeChat endpoints easy to audit.

// ============================================================================
// Application identity / storage
// ============================================================================

/// Application name, used for the per-user config directory.
pub const APP_NAME: &str = "minilink";

/// Settings snapshot file inside the config directory.
pub const SETTINGS_FILE_NAME: &str = "settings.json";

/// Persisted access-token cache file inside the config directory.
pub const TOKEN_CACHE_FILE_NAME: &str = "token_cache.json";

// ============================================================================
// WeChat endpoints
// ============================================================================

/// Stable access-token endpoint (`grant_type=client_credential`).
pub const STABLE_TOKEN_URL: &str = "https://api.weixin.qq.com/cgi-bin/stable_token";

/// URL Link generation endpoint; the access token is passed as a query parameter.
pub const URL_LINK_URL: &str = "https://api.weixin.qq.com/wxa/generate_urllink";

// ============================================================================
// Timeouts and limits
// ============================================================================

/// Request timeout for all remote calls (token, url-link, report delivery).
///
/// 15 seconds covers slow links to the platform API while still surfacing a
/// per-item failure instead of hanging a whole batch.
pub const HTTP_TIMEOUT_SECS: u64 = 15;

/// Tokens are refreshed when less than this many seconds of validity remain.
pub const TOKEN_REFRESH_MARGIN_SECS: u64 = 60;

/// Fallback token lifetime when the platform omits `expires_in`.
pub const DEFAULT_TOKEN_TTL_SECS: u64 = 7200;

/// Maximum number of captured error records retained in the aggregator.
///
/// Oldest records are dropped first once the log exceeds this bound.
pub const MAX_ERROR_RECORDS: usize = 100;
