//! Captured error records and their classification tags

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Where a captured fault was observed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorOrigin {
    /// The fault occurred in this process (including failed remote calls)
    Local,
    /// The remote side reported its own fault payload
    Remote,
}

/// Severity of a captured fault
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorSeverity {
    Error,
    Warning,
    Info,
}

/// One entry in the aggregated error log
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorRecord {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub message: String,
    pub stack: Option<String>,
    pub origin: ErrorOrigin,
    pub severity: ErrorSeverity,
}

impl ErrorRecord {
    /// Create a record stamped with a fresh id and the current time
    pub fn now(
        message: impl Into<String>,
        stack: Option<String>,
        origin: ErrorOrigin,
        severity: ErrorSeverity,
    ) -> Self {
        ErrorRecord {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            message: message.into(),
            stack,
            origin,
            severity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_serialization_tags() {
        let record = ErrorRecord::now(
            "boom",
            Some("at main.rs:1".to_string()),
            ErrorOrigin::Local,
            ErrorSeverity::Error,
        );

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["origin"], "local");
        assert_eq!(json["severity"], "error");
        assert_eq!(json["message"], "boom");
    }

    #[test]
    fn test_record_ids_are_unique() {
        let a = ErrorRecord::now("x", None, ErrorOrigin::Local, ErrorSeverity::Info);
        let b = ErrorRecord::now("x", None, ErrorOrigin::Local, ErrorSeverity::Info);
        assert_ne!(a.id, b.id);
    }
}
