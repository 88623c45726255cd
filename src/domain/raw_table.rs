//! Raw metrics table as delivered by a data source.

/// Header labels of the raw per-security metrics file.
pub mod raw_columns {
    pub const RMSE: &str = "Average_RMSE";
    pub const MAE: &str = "Average_MAE";
    pub const RETURN_POSITIVE: &str = "Average_Actual_Return_Positive";
    pub const RETURN_NEGATIVE: &str = "Average_Actual_Return_Negative";
    pub const RETURN_POSITIVE_DAILY: &str = "Average_Actual_Return_Positive_Daily";
    pub const RETURN_NEGATIVE_DAILY: &str = "Average_Actual_Return_Negative_Daily";
    pub const CAPITAL_POSITIVE: &str = "Capital_Positive";
    pub const CAPITAL_NEGATIVE: &str = "Capital_Negative";
    pub const CAPITAL_DAILY_INVESTMENT: &str = "Capital_Daily_Investment";
    pub const TIME_TAKEN: &str = "Time_Taken";

    /// Every labelled column the normalizer expects, in file order.
    pub const EXPECTED: [&str; 10] = [
        RMSE,
        MAE,
        RETURN_POSITIVE,
        RETURN_NEGATIVE,
        RETURN_POSITIVE_DAILY,
        RETURN_NEGATIVE_DAILY,
        CAPITAL_POSITIVE,
        CAPITAL_NEGATIVE,
        CAPITAL_DAILY_INVESTMENT,
        TIME_TAKEN,
    ];
}

/// Untyped rows of one raw metrics file. Column 0 is the unlabeled index.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawMetricsTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RawMetricsTable {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { headers, rows }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Position of a labelled column. The unlabeled index column never matches.
    pub fn column_index(&self, label: &str) -> Option<usize> {
        self.headers
            .iter()
            .enumerate()
            .skip(1)
            .find(|(_, h)| h.trim() == label)
            .map(|(i, _)| i)
    }

    pub fn cell(&self, row: usize, column: usize) -> Option<&str> {
        self.rows.get(row)?.get(column).map(String::as_str)
    }
}
