//! Process-wide error aggregation and remote reporting
//!
//! The aggregator is an explicitly owned instance (created once at process
//! start and passed by `Arc` to anything that can capture faults), not a
//! module-level global. The log is append-only in capture order, bounded to
//! [`MAX_ERROR_RECORDS`], and emptied only by an explicit `clear`.

use crate::constants::MAX_ERROR_RECORDS;
use crate::models::{ErrorOrigin, ErrorRecord, ErrorSeverity};
use crate::utils::ReportError;
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

/// Remote delivery of the captured error log
///
/// The concrete HTTP implementation is in `src/platform/`.
#[async_trait]
pub trait ReportTransport: Send + Sync {
    /// Submit the records plus the reporter's contact address
    async fn deliver(
        &self,
        contact_address: &str,
        records: &[ErrorRecord],
    ) -> Result<(), ReportError>;
}

/// Bounded, ordered capture log for runtime faults
pub struct ErrorAggregator {
    records: Mutex<Vec<ErrorRecord>>,
}

impl ErrorAggregator {
    pub fn new() -> Self {
        ErrorAggregator {
            records: Mutex::new(Vec::new()),
        }
    }

    /// Append a record; never fails
    ///
    /// A fault inside capture itself (a poisoned lock from a panicking
    /// thread) is recovered rather than propagated.
    pub fn capture(
        &self,
        message: impl Into<String>,
        stack: Option<String>,
        origin: ErrorOrigin,
        severity: ErrorSeverity,
    ) -> ErrorRecord {
        let record = ErrorRecord::now(message, stack, origin, severity);

        let mut records = self.lock_records();
        records.push(record.clone());

        // Keep only the newest MAX_ERROR_RECORDS entries
        if records.len() > MAX_ERROR_RECORDS {
            let excess = records.len() - MAX_ERROR_RECORDS;
            records.drain(..excess);
        }

        record
    }

    /// Empty the log
    pub fn clear(&self) {
        self.lock_records().clear();
    }

    /// Snapshot of the current log, in capture order
    pub fn records(&self) -> Vec<ErrorRecord> {
        self.lock_records().clone()
    }

    pub fn len(&self) -> usize {
        self.lock_records().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock_records().is_empty()
    }

    /// Submit the current log to the report endpoint
    ///
    /// The log is NOT cleared on success; the submit-then-clear workflow
    /// belongs to the caller so a delivery failure always retains the records
    /// for a manual retry.
    pub async fn report(
        &self,
        transport: &dyn ReportTransport,
        contact_address: &str,
    ) -> Result<(), ReportError> {
        let snapshot = self.records();
        transport.deliver(contact_address, &snapshot).await
    }

    fn lock_records(&self) -> std::sync::MutexGuard<'_, Vec<ErrorRecord>> {
        self.records.lock().unwrap_or_else(|poisoned| {
            log::warn!("Recovered from poisoned error-log mutex - previous thread panicked");
            poisoned.into_inner()
        })
    }
}

impl Default for ErrorAggregator {
    fn default() -> Self {
        Self::new()
    }
}

/// Capture process panics into the aggregator with `origin = Local`
///
/// The previous hook is chained so default stderr reporting is preserved.
pub fn install_panic_hook(aggregator: Arc<ErrorAggregator>) {
    let previous = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let message = match info.payload().downcast_ref::<&str>() {
            Some(s) => (*s).to_string(),
            None => match info.payload().downcast_ref::<String>() {
                Some(s) => s.clone(),
                None => "panic with non-string payload".to_string(),
            },
        };
        let location = info.location().map(|l| l.to_string());

        aggregator.capture(message, location, ErrorOrigin::Local, ErrorSeverity::Error);
        previous(info);
    }));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::mock_bridge::MockReportTransport;

    #[test]
    fn test_capture_appends_in_order() {
        let aggregator = ErrorAggregator::new();
        aggregator.capture("first", None, ErrorOrigin::Local, ErrorSeverity::Error);
        aggregator.capture(
            "second",
            Some("stack".to_string()),
            ErrorOrigin::Remote,
            ErrorSeverity::Warning,
        );

        let records = aggregator.records();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].message, "first");
        assert_eq!(records[1].message, "second");
        assert_eq!(records[1].origin, ErrorOrigin::Remote);
        assert!(records[0].timestamp <= records[1].timestamp);
    }

    #[test]
    fn test_log_is_bounded_to_newest_records() {
        let aggregator = ErrorAggregator::new();
        for i in 0..(MAX_ERROR_RECORDS + 25) {
            aggregator.capture(
                format!("fault {}", i),
                None,
                ErrorOrigin::Local,
                ErrorSeverity::Info,
            );
        }

        let records = aggregator.records();
        assert_eq!(records.len(), MAX_ERROR_RECORDS);
        assert_eq!(records[0].message, "fault 25");
        assert_eq!(
            records.last().unwrap().message,
            format!("fault {}", MAX_ERROR_RECORDS + 24)
        );
    }

    #[test]
    fn test_clear_empties_the_log() {
        let aggregator = ErrorAggregator::new();
        aggregator.capture("x", None, ErrorOrigin::Local, ErrorSeverity::Error);
        assert!(!aggregator.is_empty());

        aggregator.clear();
        assert!(aggregator.is_empty());
        assert_eq!(aggregator.len(), 0);
    }

    #[tokio::test]
    async fn test_report_success_then_caller_clears() {
        let aggregator = ErrorAggregator::new();
        aggregator.capture("boom", None, ErrorOrigin::Local, ErrorSeverity::Error);

        let transport = MockReportTransport::new();
        aggregator
            .report(&transport, "dev@example.com")
            .await
            .unwrap();

        // report itself leaves the log intact; the workflow clears on success
        assert_eq!(aggregator.len(), 1);
        aggregator.clear();
        assert!(aggregator.is_empty());

        let deliveries = transport.deliveries();
        assert_eq!(deliveries.len(), 1);
        assert_eq!(deliveries[0].0, "dev@example.com");
        assert_eq!(deliveries[0].1, 1);
    }

    #[tokio::test]
    async fn test_report_failure_retains_the_log() {
        let aggregator = ErrorAggregator::new();
        aggregator.capture("boom", None, ErrorOrigin::Local, ErrorSeverity::Error);

        let transport = MockReportTransport::failing();
        let err = aggregator
            .report(&transport, "dev@example.com")
            .await
            .unwrap_err();

        assert!(matches!(err, ReportError::Delivery(_)));
        assert_eq!(aggregator.len(), 1);
    }

    #[test]
    fn test_panic_hook_captures_local_error_record() {
        let aggregator = Arc::new(ErrorAggregator::new());
        install_panic_hook(aggregator.clone());

        let handle = std::thread::spawn(|| {
            panic!("worker exploded");
        });
        assert!(handle.join().is_err());

        let records = aggregator.records();
        let captured = records
            .iter()
            .find(|r| r.message.contains("worker exploded"))
            .expect("panic captured");
        assert_eq!(captured.origin, ErrorOrigin::Local);
        assert_eq!(captured.severity, ErrorSeverity::Error);
        assert!(captured
            .stack
            .as_deref()
            .is_some_and(|location| location.contains("reporter.rs")));
    }

    #[test]
    fn test_capture_survives_concurrent_writers() {
        let aggregator = Arc::new(ErrorAggregator::new());
        let mut handles = Vec::new();
        for t in 0..4 {
            let aggregator = aggregator.clone();
            handles.push(std::thread::spawn(move || {
                for i in 0..10 {
                    aggregator.capture(
                        format!("t{} f{}", t, i),
                        None,
                        ErrorOrigin::Local,
                        ErrorSeverity::Info,
                    );
                }
            }));
        }
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(aggregator.len(), 40);
    }
}
