//! minilink - batch URL Link generation for WeChat mini-programs
//!
//! Core library exposing the credential-profile store, the batch link
//! generator, and the error-aggregation/report subsystem. UI concerns stay in
//! the host; the host bridge is expressed as traits in [`core`] with concrete
//! implementations in [`platform`].

// Public modules
pub mod constants;
pub mod core;
pub mod logger;
pub mod models;
pub mod platform;
pub mod utils;

// Re-export commonly used types
pub use crate::core::{
    install_panic_hook, ErrorAggregator, LinkExchange, LinkGenerator, PersistedState,
    ProfileStore, ReportTransport, SettingsStore,
};
pub use crate::models::{
    AppSecret, CredentialProfile, EnvVariant, ErrorOrigin, ErrorRecord, ErrorSeverity,
    LinkRequestItem, LinkResult,
};
pub use crate::utils::{ExchangeError, GenerateError, ReportError, StoreError};
