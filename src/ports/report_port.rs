//! Table output port trait.

use crate::domain::error::HoldrankError;
use crate::domain::metrics_table::SecurityMetricsTable;
use crate::domain::ranker::RankedResult;
use std::path::Path;

/// Port for writing pipeline output tables for the presentation layer.
pub trait TableReportPort {
    fn write_security_table(
        &self,
        table: &SecurityMetricsTable,
        output_path: &Path,
    ) -> Result<(), HoldrankError>;

    fn write_ranked(&self, ranked: &RankedResult, output_path: &Path)
    -> Result<(), HoldrankError>;
}
