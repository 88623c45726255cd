//! Raw metrics data access port trait.

use crate::domain::error::HoldrankError;
use crate::domain::raw_table::RawMetricsTable;

/// Loads the raw metrics table behind an opaque source reference.
///
/// Implementations are shared across worker threads during a ranking pass.
pub trait MetricsSource: Send + Sync {
    /// Fails with `DataUnavailable` when the source cannot be read or parsed
    /// as CSV. Column checks are left to the normalizer.
    fn fetch_raw(&self, source_ref: &str) -> Result<RawMetricsTable, HoldrankError>;
}
