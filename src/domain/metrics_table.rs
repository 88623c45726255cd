//! Canonical per-security metrics table.

use crate::domain::percent::Percent;

pub const HOLDING_PERIODS: usize = 10;

/// Canonical column labels, in output order.
pub mod columns {
    pub const DAYS_HOLDING: &str = "Days Holding";
    pub const DAILY_RETURN_POSITIVE: &str =
        "Actual Daily Return when Buying after Positive Prediction";
    pub const DAILY_RETURN_NEGATIVE: &str =
        "Actual Daily Return when Buying after Negative Prediction";
    pub const CAPITAL_POSITIVE: &str = "Capital following Positive Prediction Strategy";
    pub const CAPITAL_NEGATIVE: &str = "Capital following Negative Prediction Strategy";
    pub const CAPITAL_DAILY_INVESTMENT: &str = "Capital Investing Every Day";
    pub const AVERAGE_MAE: &str = "Average MAE";

    pub const ALL: [&str; 7] = [
        DAYS_HOLDING,
        DAILY_RETURN_POSITIVE,
        DAILY_RETURN_NEGATIVE,
        CAPITAL_POSITIVE,
        CAPITAL_NEGATIVE,
        CAPITAL_DAILY_INVESTMENT,
        AVERAGE_MAE,
    ];
}

/// One holding-period row. Field order mirrors [`columns::ALL`].
#[derive(Debug, Clone, PartialEq)]
pub struct MetricsRow {
    pub holding_days: u32,
    pub daily_return_positive: Percent,
    pub daily_return_negative: Percent,
    pub capital_positive: f64,
    pub capital_negative: f64,
    pub capital_daily_investment: f64,
    pub average_mae: f64,
}

impl MetricsRow {
    /// Display cells in canonical column order.
    pub fn to_record(&self) -> Vec<String> {
        vec![
            self.holding_days.to_string(),
            self.daily_return_positive.to_string(),
            self.daily_return_negative.to_string(),
            format_float(self.capital_positive),
            format_float(self.capital_negative),
            format_float(self.capital_daily_investment),
            format_float(self.average_mae),
        ]
    }
}

/// Ten rows, holding periods 1..=10 in order.
#[derive(Debug, Clone, PartialEq)]
pub struct SecurityMetricsTable {
    rows: Vec<MetricsRow>,
}

impl SecurityMetricsTable {
    /// Wraps rows that already satisfy the 1..=10 ordering. Only the
    /// normalizer and the table reader build tables.
    pub(crate) fn from_rows(rows: Vec<MetricsRow>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[MetricsRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&MetricsRow> {
        self.rows.get(index)
    }

    pub fn headers() -> &'static [&'static str] {
        &columns::ALL
    }

    pub fn records(&self) -> Vec<Vec<String>> {
        self.rows.iter().map(MetricsRow::to_record).collect()
    }
}

/// Shortest representation of an already-rounded value.
pub fn format_float(value: f64) -> String {
    format!("{}", value)
}
