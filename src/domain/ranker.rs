//! Cross-security ranking of optimal rows.

use crate::domain::metrics_table::{columns, format_float};
use crate::domain::percent::Percent;
use crate::domain::selector::OptimalStrategyRow;
use std::cmp::Ordering;

pub const PRIORITY: &str = "Priority";
pub const SECURITY: &str = "Security";

pub const RANKED_COLUMNS: [&str; 6] = [
    PRIORITY,
    SECURITY,
    columns::DAILY_RETURN_POSITIVE,
    columns::CAPITAL_POSITIVE,
    columns::AVERAGE_MAE,
    columns::DAYS_HOLDING,
];

/// One shortlist line: the projected fields of an optimal row plus its rank.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedEntry {
    pub priority: usize,
    pub security: String,
    pub daily_return_positive: Percent,
    pub capital_positive: f64,
    pub average_mae: f64,
    pub holding_days: u32,
}

impl RankedEntry {
    /// Numeric sort key behind the display percentage.
    pub fn sort_key(&self) -> f64 {
        self.daily_return_positive.value()
    }

    pub fn to_record(&self) -> Vec<String> {
        vec![
            self.priority.to_string(),
            self.security.clone(),
            self.daily_return_positive.to_string(),
            format_float(self.capital_positive),
            format_float(self.average_mae),
            self.holding_days.to_string(),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct RankedResult {
    pub entries: Vec<RankedEntry>,
}

impl RankedResult {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn headers() -> &'static [&'static str] {
        &RANKED_COLUMNS
    }

    pub fn records(&self) -> Vec<Vec<String>> {
        self.entries.iter().map(RankedEntry::to_record).collect()
    }
}

/// Sort optimal rows by positive-prediction daily return, best first.
///
/// The sort is stable: equal returns keep their input order. NaN sorts last.
pub fn rank(rows: &[OptimalStrategyRow]) -> RankedResult {
    let mut entries: Vec<RankedEntry> = rows
        .iter()
        .map(|r| RankedEntry {
            priority: 0,
            security: r.security.clone(),
            daily_return_positive: r.row.daily_return_positive,
            capital_positive: r.row.capital_positive,
            average_mae: r.row.average_mae,
            holding_days: r.row.holding_days,
        })
        .collect();

    entries.sort_by(|a, b| descending_nan_last(a.sort_key(), b.sort_key()));

    for (position, entry) in entries.iter_mut().enumerate() {
        entry.priority = position + 1;
    }

    RankedResult { entries }
}

fn descending_nan_last(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => b.partial_cmp(&a).unwrap_or(Ordering::Equal),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::metrics_table::MetricsRow;

    fn optimal(security: &str, ret: &str, days: u32) -> OptimalStrategyRow {
        OptimalStrategyRow {
            security: security.to_string(),
            row: MetricsRow {
                holding_days: days,
                daily_return_positive: ret.parse().unwrap(),
                daily_return_negative: Percent::new(0.0),
                capital_positive: 120.5,
                capital_negative: 95.0,
                capital_daily_investment: 101.0,
                average_mae: 0.9,
            },
        }
    }

    #[test]
    fn orders_by_return_descending() {
        let rows = vec![
            optimal("A", "0.500%", 7),
            optimal("B", "1.200%", 7),
            optimal("C", "0.900%", 5),
        ];
        let ranked = rank(&rows);
        let order: Vec<(&str, usize)> = ranked
            .entries
            .iter()
            .map(|e| (e.security.as_str(), e.priority))
            .collect();
        assert_eq!(order, vec![("B", 1), ("C", 2), ("A", 3)]);
    }

    #[test]
    fn ties_keep_input_order() {
        let rows = vec![
            optimal("First", "0.700%", 7),
            optimal("Top", "0.900%", 7),
            optimal("Second", "0.700%", 5),
        ];
        let ranked = rank(&rows);
        let names: Vec<&str> = ranked.entries.iter().map(|e| e.security.as_str()).collect();
        assert_eq!(names, vec!["Top", "First", "Second"]);
    }

    #[test]
    fn negative_returns_rank_below_positive() {
        let rows = vec![optimal("Down", "-0.200%", 7), optimal("Up", "0.010%", 7)];
        let ranked = rank(&rows);
        assert_eq!(ranked.entries[0].security, "Up");
        assert_eq!(ranked.entries[1].priority, 2);
    }

    #[test]
    fn nan_sorts_last() {
        let mut odd = optimal("Odd", "0.000%", 7);
        odd.row.daily_return_positive = Percent::new(f64::NAN);
        let rows = vec![odd, optimal("Low", "-3.000%", 7)];
        let ranked = rank(&rows);
        assert_eq!(ranked.entries[1].security, "Odd");
    }

    #[test]
    fn projects_expected_columns() {
        let ranked = rank(&[optimal("VUSA (S&P 500)", "0.081%", 7)]);
        assert_eq!(RankedResult::headers()[0], PRIORITY);
        assert_eq!(
            ranked.records(),
            vec![vec!["1", "VUSA (S&P 500)", "0.081%", "120.5", "0.9", "7"]]
        );
    }

    #[test]
    fn empty_input_gives_empty_ranking() {
        assert!(rank(&[]).is_empty());
    }
}
