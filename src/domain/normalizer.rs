//! Raw-to-canonical schema normalization.
//!
//! Dropped raw columns (RMSE, the two non-daily average returns, elapsed
//! time) are checked for presence and then discarded; they have no field in
//! [`MetricsRow`] and so can never reach a caller.

use crate::domain::error::HoldrankError;
use crate::domain::metrics_table::{HOLDING_PERIODS, MetricsRow, SecurityMetricsTable};
use crate::domain::percent::{Percent, round3};
use crate::domain::raw_table::{RawMetricsTable, raw_columns};

struct ColumnMap {
    mae: usize,
    return_positive_daily: usize,
    return_negative_daily: usize,
    capital_positive: usize,
    capital_negative: usize,
    capital_daily_investment: usize,
}

impl ColumnMap {
    fn resolve(raw: &RawMetricsTable) -> Result<Self, HoldrankError> {
        let mut found = [0usize; raw_columns::EXPECTED.len()];
        let mut missing = Vec::new();
        for (slot, label) in found.iter_mut().zip(raw_columns::EXPECTED) {
            match raw.column_index(label) {
                Some(index) => *slot = index,
                None => missing.push(label),
            }
        }
        if !missing.is_empty() {
            return Err(HoldrankError::schema(format!(
                "missing column(s): {}",
                missing.join(", ")
            )));
        }

        // Same order as `raw_columns::EXPECTED`.
        let [_, mae, _, _, positive, negative, capital_pos, capital_neg, capital_daily, _] = found;
        Ok(Self {
            mae,
            return_positive_daily: positive,
            return_negative_daily: negative,
            capital_positive: capital_pos,
            capital_negative: capital_neg,
            capital_daily_investment: capital_daily,
        })
    }
}

/// Normalize one raw table into the canonical ten-row schema.
///
/// Holding days are restamped 1..=10 by row position; the raw index column is
/// never read. Either the whole table is produced or an error is returned.
pub fn normalize(raw: &RawMetricsTable) -> Result<SecurityMetricsTable, HoldrankError> {
    let columns = ColumnMap::resolve(raw)?;

    if raw.row_count() != HOLDING_PERIODS {
        return Err(HoldrankError::schema(format!(
            "expected {} rows, found {}",
            HOLDING_PERIODS,
            raw.row_count()
        )));
    }

    let rows = (0..HOLDING_PERIODS)
        .map(|i| -> Result<MetricsRow, HoldrankError> {
            let number = |column: usize, label: &str| numeric_cell(raw, i, column, label);
            Ok(MetricsRow {
                holding_days: (i + 1) as u32,
                daily_return_positive: Percent::new(number(
                    columns.return_positive_daily,
                    raw_columns::RETURN_POSITIVE_DAILY,
                )?),
                daily_return_negative: Percent::new(number(
                    columns.return_negative_daily,
                    raw_columns::RETURN_NEGATIVE_DAILY,
                )?),
                capital_positive: round3(number(
                    columns.capital_positive,
                    raw_columns::CAPITAL_POSITIVE,
                )?),
                capital_negative: round3(number(
                    columns.capital_negative,
                    raw_columns::CAPITAL_NEGATIVE,
                )?),
                capital_daily_investment: round3(number(
                    columns.capital_daily_investment,
                    raw_columns::CAPITAL_DAILY_INVESTMENT,
                )?),
                average_mae: round3(number(columns.mae, raw_columns::MAE)?),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(SecurityMetricsTable::from_rows(rows))
}

fn numeric_cell(
    raw: &RawMetricsTable,
    row: usize,
    column: usize,
    label: &str,
) -> Result<f64, HoldrankError> {
    let cell = raw.cell(row, column).ok_or_else(|| {
        HoldrankError::schema(format!("row {} has no {} value", row + 1, label))
    })?;
    match cell.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(HoldrankError::schema(format!(
            "row {} {}: {:?} is not a finite number",
            row + 1,
            label,
            cell
        ))),
    }
}
