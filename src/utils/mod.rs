//! # Utilities Module
//!
//! Cross-cutting concerns shared throughout the crate.
//!
//! ## Modules
//!
//! - [`errors`]: Typed error hierarchy using `thiserror` for domain-specific errors
//!
//! ## Design Notes
//!
//! Error types are defined in this module to avoid circular dependencies between
//! the `core` and `platform` modules. Each subsystem gets its own enum so a
//! caller can match on exactly the failures its operation can produce.

pub mod errors;

pub use errors::{ExchangeError, GenerateError, ReportError, StoreError};
