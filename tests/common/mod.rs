#![allow(dead_code)]

use holdrank::domain::error::HoldrankError;
use holdrank::domain::raw_table::{raw_columns, RawMetricsTable};
use holdrank::domain::roster::{Roster, SecurityIdentity};
use holdrank::ports::data_port::MetricsSource;
use std::collections::HashMap;

pub struct MockSource {
    pub tables: HashMap<String, RawMetricsTable>,
    pub errors: HashMap<String, String>,
}

impl MockSource {
    pub fn new() -> Self {
        Self {
            tables: HashMap::new(),
            errors: HashMap::new(),
        }
    }

    pub fn with_table(mut self, source_ref: &str, table: RawMetricsTable) -> Self {
        self.tables.insert(source_ref.to_string(), table);
        self
    }

    pub fn with_error(mut self, source_ref: &str, reason: &str) -> Self {
        self.errors.insert(source_ref.to_string(), reason.to_string());
        self
    }
}

impl MetricsSource for MockSource {
    fn fetch_raw(&self, source_ref: &str) -> Result<RawMetricsTable, HoldrankError> {
        if let Some(reason) = self.errors.get(source_ref) {
            return Err(HoldrankError::unavailable(source_ref, reason));
        }
        self.tables
            .get(source_ref)
            .cloned()
            .ok_or_else(|| HoldrankError::unavailable(source_ref, "not found"))
    }
}

pub fn raw_headers() -> Vec<String> {
    std::iter::once("")
        .chain(raw_columns::EXPECTED)
        .map(String::from)
        .collect()
}

/// Raw table whose positive daily return on row `i` is `daily[i]`.
pub fn raw_table_with_returns(daily: [f64; 10]) -> RawMetricsTable {
    let rows = daily
        .iter()
        .enumerate()
        .map(|(i, ret)| {
            vec![
                format!("{}", i * 3),
                "1.25".to_string(),
                format!("{}", 0.7 + i as f64 / 100.0),
                "0.9".to_string(),
                "-0.4".to_string(),
                format!("{ret}"),
                "-0.0123".to_string(),
                format!("{}", 100.0 + (i + 1) as f64 * 2.5),
                "96.5".to_string(),
                "103.75".to_string(),
                "17.2".to_string(),
            ]
        })
        .collect();
    RawMetricsTable::new(raw_headers(), rows)
}

/// Raw table with every positive daily return set to `daily`.
pub fn raw_table(daily: f64) -> RawMetricsTable {
    raw_table_with_returns([daily; 10])
}

pub fn raw_csv(table: &RawMetricsTable) -> String {
    let mut out = table.headers.join(",");
    out.push('\n');
    for row in &table.rows {
        out.push_str(&row.join(","));
        out.push('\n');
    }
    out
}

pub fn identity(ticker: &str, name: &str, optimal_index: usize) -> SecurityIdentity {
    SecurityIdentity {
        ticker: ticker.to_string(),
        name: name.to_string(),
        source: format!("{ticker}_Metrics.csv"),
        optimal_index,
    }
}

pub fn four_security_roster() -> Roster {
    Roster {
        securities: vec![
            identity("VUSA", "VUSA (S&P 500)", 6),
            identity("INRG", "INRG (iShares Global Clean Energy)", 4),
            identity("VUKE", "VUKE (FTSE 100)", 6),
            identity("EQQQ", "EQQQ (Nasdaq 100)", 6),
        ],
    }
}
