//! Per-security load → normalize → select, then one ranking pass.
//!
//! Each security runs in isolation: a failure is recorded against that
//! security and its siblings carry on. Ranking happens once, after every
//! security has finished.

use crate::domain::error::HoldrankError;
use crate::domain::metrics_table::SecurityMetricsTable;
use crate::domain::normalizer::normalize;
use crate::domain::ranker::{rank, RankedResult};
use crate::domain::roster::{Roster, SecurityIdentity};
use crate::domain::selector::{select_optimal, OptimalStrategyRow};
use crate::ports::data_port::MetricsSource;
use rayon::prelude::*;
use tracing::{debug, info, warn};

/// Result of one security's pipeline.
#[derive(Debug)]
pub struct SecurityOutcome {
    pub identity: SecurityIdentity,
    pub result: Result<(SecurityMetricsTable, OptimalStrategyRow), HoldrankError>,
}

#[derive(Debug)]
pub struct SkippedSecurity {
    pub identity: SecurityIdentity,
    pub error: HoldrankError,
}

/// Everything the presentation layer needs from one run.
#[derive(Debug)]
pub struct PipelineReport {
    pub tables: Vec<(SecurityIdentity, SecurityMetricsTable)>,
    pub ranked: RankedResult,
    pub skipped: Vec<SkippedSecurity>,
}

impl PipelineReport {
    pub fn evaluated(&self) -> usize {
        self.tables.len() + self.skipped.len()
    }
}

/// Load one security's raw table and normalize it.
pub fn load_table(
    source: &dyn MetricsSource,
    identity: &SecurityIdentity,
) -> Result<SecurityMetricsTable, HoldrankError> {
    debug!(security = %identity.name, source = %identity.source, "loading raw table");
    let raw = source.fetch_raw(&identity.source)?;
    normalize(&raw)
}

pub fn evaluate_security(source: &dyn MetricsSource, identity: &SecurityIdentity) -> SecurityOutcome {
    let result = load_table(source, identity).and_then(|table| {
        let optimal = select_optimal(&table, identity)?;
        Ok((table, optimal))
    });
    SecurityOutcome {
        identity: identity.clone(),
        result,
    }
}

/// Evaluate every security in the roster and rank the survivors.
///
/// Outcomes are kept in roster order whether or not the work is fanned out,
/// so equal returns rank in roster order.
pub fn run_pipeline(source: &dyn MetricsSource, roster: &Roster, parallel: bool) -> PipelineReport {
    info!(
        securities = roster.count(),
        parallel, "evaluating securities"
    );

    let outcomes: Vec<SecurityOutcome> = if parallel {
        roster
            .securities
            .par_iter()
            .map(|identity| evaluate_security(source, identity))
            .collect()
    } else {
        roster
            .securities
            .iter()
            .map(|identity| evaluate_security(source, identity))
            .collect()
    };

    collect_outcomes(outcomes)
}

/// Split outcomes into tables, optimal rows and skips, then rank once.
pub fn collect_outcomes(outcomes: Vec<SecurityOutcome>) -> PipelineReport {
    let mut tables = Vec::new();
    let mut optimal_rows = Vec::new();
    let mut skipped = Vec::new();

    for outcome in outcomes {
        match outcome.result {
            Ok((table, optimal)) => {
                info!(
                    security = %outcome.identity.name,
                    holding_days = optimal.row.holding_days,
                    daily_return = %optimal.row.daily_return_positive,
                    "selected optimal row"
                );
                tables.push((outcome.identity, table));
                optimal_rows.push(optimal);
            }
            Err(error) => {
                warn!(security = %outcome.identity.name, %error, "skipping security");
                skipped.push(SkippedSecurity {
                    identity: outcome.identity,
                    error,
                });
            }
        }
    }

    if !skipped.is_empty() {
        info!(
            "ranking {} of {} securities",
            optimal_rows.len(),
            optimal_rows.len() + skipped.len()
        );
    }

    PipelineReport {
        tables,
        ranked: rank(&optimal_rows),
        skipped,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::raw_table::{raw_columns, RawMetricsTable};
    use std::collections::HashMap;

    struct StubSource {
        tables: HashMap<String, RawMetricsTable>,
    }

    impl MetricsSource for StubSource {
        fn fetch_raw(&self, source_ref: &str) -> Result<RawMetricsTable, HoldrankError> {
            self.tables
                .get(source_ref)
                .cloned()
                .ok_or_else(|| HoldrankError::unavailable(source_ref, "no such file"))
        }
    }

    fn raw_with_return(daily: f64) -> RawMetricsTable {
        let headers = std::iter::once("")
            .chain(raw_columns::EXPECTED)
            .map(String::from)
            .collect();
        let rows = (0..10)
            .map(|i| {
                let mut row = vec![i.to_string()];
                row.extend(["1.0", "0.5", "2.0", "-1.0"].map(String::from));
                row.push(format!("{}", daily + i as f64 / 1000.0));
                row.extend(["-0.1", "110.0", "95.0", "104.0", "3.2"].map(String::from));
                row
            })
            .collect();
        RawMetricsTable::new(headers, rows)
    }

    fn identity(ticker: &str, index: usize) -> SecurityIdentity {
        SecurityIdentity {
            ticker: ticker.into(),
            name: format!("{ticker} fund"),
            source: format!("{ticker}.csv"),
            optimal_index: index,
        }
    }

    #[test]
    fn sequential_and_parallel_agree() {
        let source = StubSource {
            tables: HashMap::from([
                ("A.csv".to_string(), raw_with_return(0.1)),
                ("B.csv".to_string(), raw_with_return(0.3)),
                ("C.csv".to_string(), raw_with_return(0.2)),
            ]),
        };
        let roster = Roster {
            securities: vec![identity("A", 6), identity("B", 4), identity("C", 6)],
        };

        let seq = run_pipeline(&source, &roster, false);
        let par = run_pipeline(&source, &roster, true);
        assert_eq!(seq.ranked, par.ranked);
        let names: Vec<&str> = seq.ranked.entries.iter().map(|e| e.security.as_str()).collect();
        assert_eq!(names, vec!["B fund", "C fund", "A fund"]);
        assert_eq!(seq.ranked.entries[0].holding_days, 5);
        assert_eq!(seq.ranked.entries[0].daily_return_positive.to_string(), "0.304%");
    }

    #[test]
    fn failures_are_isolated() {
        let source = StubSource {
            tables: HashMap::from([("A.csv".to_string(), raw_with_return(0.1))]),
        };
        let mut roster = Roster {
            securities: vec![identity("A", 6), identity("Missing", 6), identity("A2", 99)],
        };
        roster.securities[2].source = "A.csv".into();

        let report = run_pipeline(&source, &roster, true);
        assert_eq!(report.ranked.len(), 1);
        assert_eq!(report.tables.len(), 1);
        assert_eq!(report.skipped.len(), 2);
        assert_eq!(report.evaluated(), 3);
        assert!(matches!(
            report.skipped[0].error,
            HoldrankError::DataUnavailable { .. }
        ));
        assert!(matches!(
            report.skipped[1].error,
            HoldrankError::IndexOutOfRange { index: 99, .. }
        ));
    }

    #[test]
    fn evaluate_security_returns_table_and_row() {
        let source = StubSource {
            tables: HashMap::from([("A.csv".to_string(), raw_with_return(0.1))]),
        };
        let outcome = evaluate_security(&source, &identity("A", 6));
        let (table, optimal) = outcome.result.unwrap();
        assert_eq!(table.len(), 10);
        assert_eq!(optimal.row.holding_days, 7);
        assert_eq!(optimal.security, "A fund");
    }
}
