//! Remote raw-file data adapter.
//!
//! Fetches a metrics CSV with a single blocking GET. No retries: a failed
//! fetch aborts only the security that asked for it.

use crate::adapters::csv_adapter::parse_raw_csv;
use crate::domain::error::HoldrankError;
use crate::domain::raw_table::RawMetricsTable;
use crate::ports::data_port::MetricsSource;
use std::time::Duration;
use tracing::debug;

pub struct HttpSource {
    client: reqwest::blocking::Client,
}

impl HttpSource {
    pub fn new(timeout: Duration) -> Result<Self, HoldrankError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("holdrank/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| HoldrankError::Io(std::io::Error::other(e)))?;
        Ok(Self { client })
    }
}

impl MetricsSource for HttpSource {
    fn fetch_raw(&self, source_ref: &str) -> Result<RawMetricsTable, HoldrankError> {
        debug!(url = source_ref, "GET");
        let response = self
            .client
            .get(source_ref)
            .send()
            .map_err(|e| HoldrankError::unavailable(source_ref, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(HoldrankError::unavailable(source_ref, format!("HTTP {status}")));
        }

        let body = response
            .bytes()
            .map_err(|e| HoldrankError::unavailable(source_ref, e))?;
        parse_raw_csv(source_ref, &body)
    }
}
