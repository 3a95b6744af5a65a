//! HTTP delivery of the captured error log
//!
//! Posts the report as JSON to a configurable endpoint. Transport faults and
//! non-success statuses surface as [`ReportError::Delivery`]; the caller keeps
//! the log for a manual retry in that case.

use crate::constants::HTTP_TIMEOUT_SECS;
use crate::core::reporter::ReportTransport;
use crate::models::ErrorRecord;
use crate::utils::ReportError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::time::Duration;

#[derive(Serialize)]
struct ReportPayload<'a> {
    contact: &'a str,
    reported_at: DateTime<Utc>,
    os: &'static str,
    records: &'a [ErrorRecord],
}

pub struct HttpReportDelivery {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpReportDelivery {
    pub fn new(endpoint: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        HttpReportDelivery {
            client,
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl ReportTransport for HttpReportDelivery {
    async fn deliver(
        &self,
        contact_address: &str,
        records: &[ErrorRecord],
    ) -> Result<(), ReportError> {
        let payload = ReportPayload {
            contact: contact_address,
            reported_at: Utc::now(),
            os: std::env::consts::OS,
            records,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .json(&payload)
            .send()
            .await
            .map_err(|e| ReportError::Delivery(format!("Report request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ReportError::Delivery(format!(
                "Report endpoint returned status {}",
                status.as_u16()
            )));
        }

        log::info!("Error report delivered ({} record(s))", records.len());
        Ok(())
    }
}
