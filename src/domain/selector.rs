//! Optimal holding-period row selection.

use crate::domain::error::HoldrankError;
use crate::domain::metrics_table::{MetricsRow, SecurityMetricsTable};
use crate::domain::roster::SecurityIdentity;

/// A table row tagged with the display name of the security it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct OptimalStrategyRow {
    pub security: String,
    pub row: MetricsRow,
}

/// Pick the row the security's configured rule points at.
///
/// The rule is a static index, not a search over the table. The roster and
/// the data are configured independently, so the index is bounds-checked.
pub fn select_optimal(
    table: &SecurityMetricsTable,
    identity: &SecurityIdentity,
) -> Result<OptimalStrategyRow, HoldrankError> {
    let row = table
        .get(identity.optimal_index)
        .ok_or_else(|| HoldrankError::IndexOutOfRange {
            security: identity.name.clone(),
            index: identity.optimal_index,
            rows: table.len(),
        })?;

    Ok(OptimalStrategyRow {
        security: identity.name.clone(),
        row: row.clone(),
    })
}
