//! CSV file data adapter.

use crate::domain::error::HoldrankError;
use crate::domain::metrics_table::{HOLDING_PERIODS, MetricsRow, SecurityMetricsTable};
use crate::domain::percent::Percent;
use crate::domain::raw_table::RawMetricsTable;
use crate::ports::data_port::MetricsSource;
use std::fs;
use std::path::{Path, PathBuf};

pub struct CsvFileSource {
    base_path: Option<PathBuf>,
}

impl CsvFileSource {
    pub fn new(base_path: Option<PathBuf>) -> Self {
        Self { base_path }
    }

    fn resolve(&self, source_ref: &str) -> PathBuf {
        let path = Path::new(source_ref);
        match &self.base_path {
            Some(base) if path.is_relative() => base.join(path),
            _ => path.to_path_buf(),
        }
    }
}

impl MetricsSource for CsvFileSource {
    fn fetch_raw(&self, source_ref: &str) -> Result<RawMetricsTable, HoldrankError> {
        let path = self.resolve(source_ref);
        let content = fs::read_to_string(&path).map_err(|e| {
            HoldrankError::unavailable(source_ref, format!("failed to read {}: {}", path.display(), e))
        })?;
        parse_raw_csv(source_ref, content.as_bytes())
    }
}

/// Parse raw CSV bytes: one header row, then data rows of equal width.
pub fn parse_raw_csv(source_ref: &str, bytes: &[u8]) -> Result<RawMetricsTable, HoldrankError> {
    let mut rdr = csv::Reader::from_reader(bytes);

    let headers: Vec<String> = rdr
        .headers()
        .map_err(|e| HoldrankError::unavailable(source_ref, format!("CSV parse error: {}", e)))?
        .iter()
        .map(String::from)
        .collect();

    let mut rows = Vec::new();
    for result in rdr.records() {
        let record = result
            .map_err(|e| HoldrankError::unavailable(source_ref, format!("CSV parse error: {}", e)))?;
        rows.push(record.iter().map(String::from).collect());
    }

    Ok(RawMetricsTable::new(headers, rows))
}

/// Read a normalized table previously written by the CSV report adapter.
pub fn read_security_table(path: &Path) -> Result<SecurityMetricsTable, HoldrankError> {
    let source_ref = path.display().to_string();
    let content = fs::read_to_string(path)
        .map_err(|e| HoldrankError::unavailable(&source_ref, format!("failed to read: {}", e)))?;
    let raw = parse_raw_csv(&source_ref, content.as_bytes())?;

    let expected = SecurityMetricsTable::headers();
    let headers: Vec<&str> = raw.headers.iter().map(|h| h.trim()).collect();
    if headers != expected {
        return Err(HoldrankError::schema(format!(
            "{}: expected columns {:?}, found {:?}",
            source_ref, expected, headers
        )));
    }
    if raw.row_count() != HOLDING_PERIODS {
        return Err(HoldrankError::schema(format!(
            "{}: expected {} rows, found {}",
            source_ref,
            HOLDING_PERIODS,
            raw.row_count()
        )));
    }

    let number = |cell: &str, label: &str| -> Result<f64, HoldrankError> {
        cell.trim().parse::<f64>().map_err(|_| {
            HoldrankError::schema(format!("{}: {} {:?} is not a number", source_ref, label, cell))
        })
    };

    let mut rows = Vec::with_capacity(HOLDING_PERIODS);
    for (i, record) in raw.rows.iter().enumerate() {
        let holding_days: u32 = record[0].trim().parse().map_err(|_| {
            HoldrankError::schema(format!("{}: bad holding days {:?}", source_ref, record[0]))
        })?;
        if holding_days as usize != i + 1 {
            return Err(HoldrankError::schema(format!(
                "{}: row {} has holding days {}",
                source_ref,
                i + 1,
                holding_days
            )));
        }
        rows.push(MetricsRow {
            holding_days,
            daily_return_positive: record[1].parse::<Percent>()?,
            daily_return_negative: record[2].parse::<Percent>()?,
            capital_positive: number(&record[3], expected[3])?,
            capital_negative: number(&record[4], expected[4])?,
            capital_daily_investment: number(&record[5], expected[5])?,
            average_mae: number(&record[6], expected[6])?,
        });
    }

    Ok(SecurityMetricsTable::from_rows(rows))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const RAW_HEADER: &str = ",Average_RMSE,Average_MAE,Average_Actual_Return_Positive,\
        Average_Actual_Return_Negative,Average_Actual_Return_Positive_Daily,\
        Average_Actual_Return_Negative_Daily,Capital_Positive,Capital_Negative,\
        Capital_Daily_Investment,Time_Taken";

    fn raw_csv() -> String {
        let mut out = format!("{RAW_HEADER}\n");
        for i in 0..10 {
            out.push_str(&format!(
                "{i},1.1,0.61234,0.9,-0.4,0.0{i}5,-0.01,110.1234,97.5,104.0,12.3\n"
            ));
        }
        out
    }

    fn setup_test_data() -> (TempDir, PathBuf) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().to_path_buf();
        fs::write(path.join("VUSA_Metrics.csv"), raw_csv()).unwrap();
        fs::write(path.join("BROKEN_Metrics.csv"), "a,b\n1,2,3\n").unwrap();
        (dir, path)
    }

    #[test]
    fn fetch_raw_reads_relative_to_base() {
        let (_dir, path) = setup_test_data();
        let source = CsvFileSource::new(Some(path));

        let raw = source.fetch_raw("VUSA_Metrics.csv").unwrap();
        assert_eq!(raw.headers.len(), 11);
        assert_eq!(raw.headers[0], "");
        assert_eq!(raw.row_count(), 10);
        assert_eq!(raw.cell(3, 5), Some("0.035"));
    }

    #[test]
    fn fetch_raw_accepts_absolute_paths() {
        let (_dir, path) = setup_test_data();
        let source = CsvFileSource::new(Some(PathBuf::from("/unused")));
        let absolute = path.join("VUSA_Metrics.csv");
        let raw = source.fetch_raw(absolute.to_str().unwrap()).unwrap();
        assert_eq!(raw.row_count(), 10);
    }

    #[test]
    fn fetch_raw_missing_file_is_unavailable() {
        let (_dir, path) = setup_test_data();
        let source = CsvFileSource::new(Some(path));
        assert!(matches!(
            source.fetch_raw("XYZ_Metrics.csv"),
            Err(HoldrankError::DataUnavailable { source_ref, .. }) if source_ref == "XYZ_Metrics.csv"
        ));
    }

    #[test]
    fn ragged_csv_is_unavailable() {
        let (_dir, path) = setup_test_data();
        let source = CsvFileSource::new(Some(path));
        assert!(matches!(
            source.fetch_raw("BROKEN_Metrics.csv"),
            Err(HoldrankError::DataUnavailable { .. })
        ));
    }

    #[test]
    fn read_security_table_round_trips_written_output() {
        use crate::adapters::csv_report_adapter::CsvReportAdapter;
        use crate::domain::normalizer::normalize;
        use crate::ports::report_port::TableReportPort;

        let (dir, path) = setup_test_data();
        let raw = CsvFileSource::new(Some(path)).fetch_raw("VUSA_Metrics.csv").unwrap();
        let table = normalize(&raw).unwrap();

        let out = dir.path().join("VUSA_normalized.csv");
        CsvReportAdapter::new().write_security_table(&table, &out).unwrap();
        let reread = read_security_table(&out).unwrap();
        assert_eq!(reread, table);
    }

    #[test]
    fn read_security_table_rejects_bad_percent() {
        let dir = TempDir::new().unwrap();
        let mut content = SecurityMetricsTable::headers()
            .iter()
            .map(|h| h.to_string())
            .collect::<Vec<_>>()
            .join(",");
        content.push('\n');
        for day in 1..=10 {
            let ret = if day == 4 { "0.12" } else { "0.120%" };
            content.push_str(&format!("{day},{ret},-0.010%,110.1,97.5,104,0.6\n"));
        }
        let path = dir.path().join("t.csv");
        fs::write(&path, content).unwrap();

        assert!(matches!(
            read_security_table(&path),
            Err(HoldrankError::ParseError { value }) if value == "0.12"
        ));
    }

    #[test]
    fn read_security_table_rejects_raw_layout() {
        let (_dir, path) = setup_test_data();
        assert!(matches!(
            read_security_table(&path.join("VUSA_Metrics.csv")),
            Err(HoldrankError::SchemaMismatch { .. })
        ));
    }
}
