//! Error types for minilink
//!
//! All error types use thiserror for clean error handling.
//! SECURITY: Error messages MUST NOT contain app secrets or access tokens.

/// Errors from credential-profile store operations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Profile not found: {0}")]
    NotFound(String),

    #[error("Persistence error: {0}")]
    Persistence(String),
}

/// Precondition failures on batch link generation
///
/// Per-item remote failures are NOT represented here; they are recovered
/// into the result list and never abort the batch.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum GenerateError {
    #[error("No mini-program profile selected")]
    NoProfileSelected,

    #[error("No items with a non-empty path")]
    NoValidItems,
}

/// Errors from a single deep-link exchange call
#[derive(Debug, thiserror::Error)]
pub enum ExchangeError {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Unexpected HTTP status: {0}")]
    Status(u16),

    #[error("Malformed response: {0}")]
    Malformed(String),

    #[error("API error: {0}")]
    Api(String),
}

/// Errors from error-report delivery
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("Delivery failed: {0}")]
    Delivery(String),
}
