//! # Domain Models
//!
//! Core data structures representing credential profiles, link batches, and
//! captured error records.
//!
//! ## Security Design
//!
//! The [`AppSecret`] type provides memory-safe secret handling:
//! - Secret data is zeroed on drop to prevent leakage via swap/core dumps
//! - Never exposed in `Debug` implementations
//! - Uses unsafe code (carefully audited) for memory zeroing
//!
//! Secrets are persisted only inside the settings snapshot in the per-user
//! config directory, never in log output or error messages.

pub mod link;
pub mod profile;
pub mod report;

pub use link::{LinkRequestItem, LinkResult};
pub use profile::{AppSecret, CredentialProfile, EnvVariant};
pub use report::{ErrorOrigin, ErrorRecord, ErrorSeverity};
