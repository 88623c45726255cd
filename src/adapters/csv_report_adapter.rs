//! CSV report adapter implementing TableReportPort.
//!
//! Writes the canonical per-security table and the ranked shortlist with
//! their display labels, ready for a presentation layer to render.

use crate::domain::error::HoldrankError;
use crate::domain::metrics_table::SecurityMetricsTable;
use crate::domain::ranker::RankedResult;
use crate::ports::report_port::TableReportPort;
use std::path::Path;

#[derive(Debug, Default)]
pub struct CsvReportAdapter;

impl CsvReportAdapter {
    pub fn new() -> Self {
        Self
    }

    fn write_records(
        headers: &[&str],
        records: &[Vec<String>],
        output_path: &Path,
    ) -> Result<(), HoldrankError> {
        let mut writer = csv::Writer::from_path(output_path).map_err(csv_to_io)?;
        writer.write_record(headers).map_err(csv_to_io)?;
        for record in records {
            writer.write_record(record).map_err(csv_to_io)?;
        }
        writer.flush()?;
        Ok(())
    }
}

fn csv_to_io(err: csv::Error) -> HoldrankError {
    HoldrankError::Io(err.into())
}

impl TableReportPort for CsvReportAdapter {
    fn write_security_table(
        &self,
        table: &SecurityMetricsTable,
        output_path: &Path,
    ) -> Result<(), HoldrankError> {
        Self::write_records(SecurityMetricsTable::headers(), &table.records(), output_path)
    }

    fn write_ranked(&self, ranked: &RankedResult, output_path: &Path) -> Result<(), HoldrankError> {
        Self::write_records(RankedResult::headers(), &ranked.records(), output_path)
    }
}
