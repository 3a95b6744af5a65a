//! Core business logic (platform-agnostic)
//!
//! CRITICAL: This module MUST NOT import network or filesystem code; the
//! collaborators it needs are expressed as traits and implemented in
//! `src/platform/`.

pub mod exchange;
pub mod generator;
pub mod persist;
pub mod reporter;
pub mod store;

// Mock collaborators (tests only)
#[cfg(test)]
pub mod mock_bridge;

pub use exchange::LinkExchange;
pub use generator::LinkGenerator;
pub use persist::{PersistedState, SettingsStore};
pub use reporter::{install_panic_hook, ErrorAggregator, ReportTransport};
pub use store::ProfileStore;
