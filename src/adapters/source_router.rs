//! Dispatches source references to the file or HTTP adapter.

use crate::adapters::csv_adapter::CsvFileSource;
use crate::domain::error::HoldrankError;
use crate::domain::raw_table::RawMetricsTable;
use crate::ports::data_port::MetricsSource;
use std::path::PathBuf;
use std::time::Duration;

pub fn is_remote(source_ref: &str) -> bool {
    let lower = source_ref.trim_start().to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

pub struct RoutingSource {
    files: CsvFileSource,
    #[cfg(feature = "remote")]
    http: crate::adapters::http_adapter::HttpSource,
}

impl RoutingSource {
    pub fn new(data_dir: Option<PathBuf>, timeout: Duration) -> Result<Self, HoldrankError> {
        #[cfg(not(feature = "remote"))]
        let _ = timeout;
        Ok(Self {
            files: CsvFileSource::new(data_dir),
            #[cfg(feature = "remote")]
            http: crate::adapters::http_adapter::HttpSource::new(timeout)?,
        })
    }
}

impl MetricsSource for RoutingSource {
    fn fetch_raw(&self, source_ref: &str) -> Result<RawMetricsTable, HoldrankError> {
        if !is_remote(source_ref) {
            return self.files.fetch_raw(source_ref);
        }

        #[cfg(feature = "remote")]
        {
            self.http.fetch_raw(source_ref)
        }

        #[cfg(not(feature = "remote"))]
        {
            Err(HoldrankError::unavailable(
                source_ref,
                "remote feature is required for URL sources",
            ))
        }
    }
}
