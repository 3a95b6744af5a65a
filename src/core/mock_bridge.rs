//! Mock collaborators for testing without the network or filesystem
//!
//! Scriptable implementations of the exchange, delivery, and persistence
//! traits. Used to test batch reconciliation and store commit semantics
//! without platform credentials or real endpoints.

use crate::core::exchange::LinkExchange;
use crate::core::persist::{PersistedState, SettingsStore};
use crate::core::reporter::ReportTransport;
use crate::models::{AppSecret, EnvVariant, ErrorRecord};
use crate::utils::{ExchangeError, ReportError, StoreError};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

/// Arguments observed by the mock exchange, one entry per call
#[derive(Debug, Clone)]
pub struct ExchangeCall {
    pub app_id: String,
    pub env: EnvVariant,
    pub path: String,
    pub query: String,
}

/// Mock link exchange
///
/// Succeeds with a deterministic link unless the path was scripted to fail.
pub struct MockLinkExchange {
    fail_paths: Mutex<HashMap<String, String>>,
    calls: Mutex<Vec<ExchangeCall>>,
}

impl MockLinkExchange {
    pub fn new() -> Self {
        MockLinkExchange {
            fail_paths: Mutex::new(HashMap::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Script a transport failure for one path
    pub fn fail_path(&self, path: &str, message: &str) {
        self.fail_paths
            .lock()
            .unwrap()
            .insert(path.to_string(), message.to_string());
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn calls(&self) -> Vec<ExchangeCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl LinkExchange for MockLinkExchange {
    async fn exchange(
        &self,
        app_id: &str,
        _secret: &AppSecret,
        env: EnvVariant,
        path: &str,
        query: &str,
    ) -> Result<String, ExchangeError> {
        self.calls.lock().unwrap().push(ExchangeCall {
            app_id: app_id.to_string(),
            env,
            path: path.to_string(),
            query: query.to_string(),
        });

        if let Some(message) = self.fail_paths.lock().unwrap().get(path) {
            return Err(ExchangeError::Transport(message.clone()));
        }

        Ok(format!("https://wxaurl.cn/mock-{}", path.replace('/', "-")))
    }
}

/// Mock report delivery recording (contact, record count) per submission
pub struct MockReportTransport {
    fail: bool,
    deliveries: Mutex<Vec<(String, usize)>>,
}

impl MockReportTransport {
    pub fn new() -> Self {
        MockReportTransport {
            fail: false,
            deliveries: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        MockReportTransport {
            fail: true,
            deliveries: Mutex::new(Vec::new()),
        }
    }

    pub fn deliveries(&self) -> Vec<(String, usize)> {
        self.deliveries.lock().unwrap().clone()
    }
}

#[async_trait]
impl ReportTransport for MockReportTransport {
    async fn deliver(
        &self,
        contact_address: &str,
        records: &[ErrorRecord],
    ) -> Result<(), ReportError> {
        if self.fail {
            return Err(ReportError::Delivery(
                "simulated delivery failure".to_string(),
            ));
        }
        self.deliveries
            .lock()
            .unwrap()
            .push((contact_address.to_string(), records.len()));
        Ok(())
    }
}

/// In-memory settings persistence with scriptable save failures
pub struct MockSettingsStore {
    state: Mutex<PersistedState>,
    fail_next_save: AtomicBool,
    saves: AtomicUsize,
}

impl MockSettingsStore {
    pub fn new() -> Self {
        MockSettingsStore {
            state: Mutex::new(PersistedState::default()),
            fail_next_save: AtomicBool::new(false),
            saves: AtomicUsize::new(0),
        }
    }

    /// Make the next save fail with a persistence error
    pub fn fail_next_save(&self) {
        self.fail_next_save.store(true, Ordering::SeqCst);
    }

    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SettingsStore for MockSettingsStore {
    async fn load(&self) -> Result<PersistedState, StoreError> {
        Ok(self.state.lock().unwrap().clone())
    }

    async fn save(&self, state: &PersistedState) -> Result<(), StoreError> {
        if self.fail_next_save.swap(false, Ordering::SeqCst) {
            return Err(StoreError::Persistence(
                "simulated save failure".to_string(),
            ));
        }
        *self.state.lock().unwrap() = state.clone();
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
