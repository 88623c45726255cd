//! CLI definition and dispatch.

use clap::{Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;
use tracing::{error, info, warn};

use crate::adapters::csv_adapter::read_security_table;
use crate::adapters::csv_report_adapter::CsvReportAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::source_router::RoutingSource;
use crate::domain::config_validation::{
    out_of_range_rules, validate_config, PipelineSettings,
};
use crate::domain::error::HoldrankError;
use crate::domain::metrics_table::SecurityMetricsTable;
use crate::domain::pipeline::{collect_outcomes, load_table, run_pipeline, PipelineReport, SecurityOutcome};
use crate::domain::ranker::RankedResult;
use crate::domain::roster::{Roster, SecurityIdentity};
use crate::domain::selector::select_optimal;
use crate::ports::data_port::MetricsSource;
use crate::ports::report_port::TableReportPort;

#[derive(Parser, Debug)]
#[command(
    name = "holdrank",
    about = "Pick the optimal holding period per security and rank the shortlist"
)]
pub struct Cli {
    /// Log debug output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List configured securities and their optimal holding periods
    List {
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Show the normalized metrics table for one security
    Show {
        #[arg(short, long)]
        security: String,
        #[arg(short, long)]
        config: Option<PathBuf>,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Evaluate every security and print the ranked shortlist
    Rank {
        #[arg(short, long)]
        config: Option<PathBuf>,
        #[arg(short, long)]
        output_dir: Option<PathBuf>,
        #[arg(long)]
        sequential: bool,
    },
    /// Rank from previously exported normalized tables
    Rerank {
        #[arg(short, long)]
        tables: PathBuf,
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Validate a roster configuration
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::List { config } => run_list(config.as_ref()),
        Command::Show {
            security,
            config,
            output,
        } => run_show(&security, config.as_ref(), output.as_ref()),
        Command::Rank {
            config,
            output_dir,
            sequential,
        } => run_rank(config.as_ref(), output_dir.as_ref(), sequential),
        Command::Rerank { tables, config } => run_rerank(&tables, config.as_ref()),
        Command::Validate { config } => run_validate(&config),
    }
}

pub fn load_config(path: &PathBuf) -> Result<FileConfigAdapter, ExitCode> {
    FileConfigAdapter::from_file(path).map_err(|e| {
        let err = HoldrankError::ConfigParse {
            file: path.display().to_string(),
            reason: e.to_string(),
        };
        error!("{err}");
        ExitCode::from(&err)
    })
}

/// Roster and settings from a config file, or the built-in roster.
///
/// A relative `data_dir` is resolved against the config file's directory.
pub fn resolve_roster(config_path: Option<&PathBuf>) -> Result<(Roster, PipelineSettings), ExitCode> {
    let Some(path) = config_path else {
        info!("Using built-in roster");
        return Ok((Roster::builtin(), PipelineSettings::default()));
    };

    info!("Loading config from {}", path.display());
    let adapter = load_config(path)?;
    let (roster, mut settings) = validate_config(&adapter).map_err(|e| {
        error!("{e}");
        ExitCode::from(&e)
    })?;

    if let Some(dir) = settings.data_dir.as_deref() {
        let dir = Path::new(dir);
        if dir.is_relative() {
            if let Some(parent) = path.parent() {
                settings.data_dir = Some(parent.join(dir).display().to_string());
            }
        }
    }

    Ok((roster, settings))
}

fn build_source(settings: &PipelineSettings) -> Result<RoutingSource, ExitCode> {
    RoutingSource::new(
        settings.data_dir.as_ref().map(PathBuf::from),
        Duration::from_secs(settings.timeout_secs),
    )
    .map_err(|e| {
        error!("{e}");
        ExitCode::from(&e)
    })
}

/// Render a table as left-aligned, space-padded text.
pub fn render_table(headers: &[&str], records: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for record in records {
        for (i, cell) in record.iter().enumerate() {
            if let Some(w) = widths.get_mut(i) {
                *w = (*w).max(cell.chars().count());
            }
        }
    }

    let line = |cells: Vec<&str>| {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, &w)| format!("{cell:<w$}"))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut out = line(headers.to_vec());
    out.push('\n');
    out.push_str(&ruler(&widths));
    for record in records {
        out.push('\n');
        out.push_str(&line(record.iter().map(String::as_str).collect()));
    }
    out.push('\n');
    out
}

fn ruler(widths: &[usize]) -> String {
    widths
        .iter()
        .map(|&w| "-".repeat(w))
        .collect::<Vec<_>>()
        .join("  ")
}

fn run_list(config_path: Option<&PathBuf>) -> ExitCode {
    let (roster, _) = match resolve_roster(config_path) {
        Ok(r) => r,
        Err(code) => return code,
    };

    let records: Vec<Vec<String>> = roster
        .securities
        .iter()
        .map(|s| {
            vec![
                s.ticker.clone(),
                s.name.clone(),
                s.optimal_holding_days().to_string(),
                s.source.clone(),
            ]
        })
        .collect();
    print!(
        "{}",
        render_table(&["Ticker", "Security", "Optimal Days", "Source"], &records)
    );
    ExitCode::SUCCESS
}

fn run_show(key: &str, config_path: Option<&PathBuf>, output: Option<&PathBuf>) -> ExitCode {
    let (roster, settings) = match resolve_roster(config_path) {
        Ok(r) => r,
        Err(code) => return code,
    };
    let Some(identity) = roster.find(key) else {
        error!("unknown security {key:?}");
        return ExitCode::from(2);
    };
    let source = match build_source(&settings) {
        Ok(s) => s,
        Err(code) => return code,
    };

    show_security(&source, identity, output.map(PathBuf::as_path))
}

/// Normalize one security, print it, and optionally write it as CSV.
pub fn show_security(
    source: &dyn MetricsSource,
    identity: &SecurityIdentity,
    output: Option<&Path>,
) -> ExitCode {
    let table = match load_table(source, identity) {
        Ok(t) => t,
        Err(e) => {
            error!(security = %identity.name, "{e}");
            return (&e).into();
        }
    };

    let optimal = match select_optimal(&table, identity) {
        Ok(o) => o,
        Err(e) => {
            error!(security = %identity.name, "{e}");
            return (&e).into();
        }
    };

    println!("{}", identity.name);
    print!(
        "{}",
        render_table(SecurityMetricsTable::headers(), &table.records())
    );
    println!("Optimal holding period: {} days", optimal.row.holding_days);

    if let Some(path) = output {
        if let Err(e) = CsvReportAdapter::new().write_security_table(&table, path) {
            error!("failed to write {}: {e}", path.display());
            return (&e).into();
        }
        info!("Table written to: {}", path.display());
    }
    ExitCode::SUCCESS
}

fn run_rank(config_path: Option<&PathBuf>, output_dir: Option<&PathBuf>, sequential: bool) -> ExitCode {
    let (roster, settings) = match resolve_roster(config_path) {
        Ok(r) => r,
        Err(code) => return code,
    };
    let source = match build_source(&settings) {
        Ok(s) => s,
        Err(code) => return code,
    };

    let parallel = settings.parallel && !sequential;
    rank_pipeline(&source, &roster, parallel, output_dir.map(PathBuf::as_path))
}

/// Run the full pipeline, print the shortlist, and write CSVs when asked.
pub fn rank_pipeline(
    source: &dyn MetricsSource,
    roster: &Roster,
    parallel: bool,
    output_dir: Option<&Path>,
) -> ExitCode {
    let report = run_pipeline(source, roster, parallel);
    finish_ranking(&report, output_dir)
}

fn run_rerank(tables_dir: &Path, config_path: Option<&PathBuf>) -> ExitCode {
    let (roster, _) = match resolve_roster(config_path) {
        Ok(r) => r,
        Err(code) => return code,
    };
    let report = rerank_from_tables(tables_dir, &roster);
    finish_ranking(&report, None)
}

/// File name used for an exported normalized table.
pub fn table_file_name(identity: &SecurityIdentity) -> String {
    format!("{}_normalized.csv", identity.ticker)
}

/// Rank from exported `<TICKER>_normalized.csv` files without fetching.
pub fn rerank_from_tables(tables_dir: &Path, roster: &Roster) -> PipelineReport {
    let outcomes = roster
        .securities
        .iter()
        .map(|identity| {
            let path = tables_dir.join(table_file_name(identity));
            let result = read_security_table(&path).and_then(|table| {
                let optimal = select_optimal(&table, identity)?;
                Ok((table, optimal))
            });
            SecurityOutcome {
                identity: identity.clone(),
                result,
            }
        })
        .collect();
    collect_outcomes(outcomes)
}

fn finish_ranking(report: &PipelineReport, output_dir: Option<&Path>) -> ExitCode {
    if report.ranked.is_empty() {
        error!(
            "no securities could be ranked ({} evaluated)",
            report.evaluated()
        );
        return ExitCode::from(5);
    }

    print!("{}", render_ranked(&report.ranked));
    if !report.skipped.is_empty() {
        println!("\nSkipped:");
        for skipped in &report.skipped {
            println!("  {}: {}", skipped.identity.name, skipped.error);
        }
    }

    if let Some(dir) = output_dir {
        if let Err(e) = write_outputs(report, dir) {
            error!("failed to write outputs: {e}");
            return (&e).into();
        }
        info!("Tables written to: {}", dir.display());
    }
    ExitCode::SUCCESS
}

pub fn render_ranked(ranked: &RankedResult) -> String {
    render_table(RankedResult::headers(), &ranked.records())
}

/// Write `ranked.csv` plus one normalized table per ranked security.
pub fn write_outputs(report: &PipelineReport, dir: &Path) -> Result<(), HoldrankError> {
    fs::create_dir_all(dir)?;
    let writer = CsvReportAdapter::new();
    writer.write_ranked(&report.ranked, &dir.join("ranked.csv"))?;
    for (identity, table) in &report.tables {
        writer.write_security_table(table, &dir.join(table_file_name(identity)))?;
    }
    Ok(())
}

fn run_validate(config_path: &PathBuf) -> ExitCode {
    info!("Validating roster: {}", config_path.display());
    let (roster, settings) = match resolve_roster(Some(config_path)) {
        Ok(r) => r,
        Err(code) => return code,
    };

    for identity in out_of_range_rules(&roster) {
        warn!(
            "{}: optimal_index {} is outside the 10 holding periods",
            identity.name, identity.optimal_index
        );
    }

    println!("{} securities configured", roster.count());
    for s in &roster.securities {
        println!("  {} -> {} days", s.name, s.optimal_holding_days());
    }
    println!(
        "parallel: {}, timeout: {}s, data_dir: {}",
        settings.parallel,
        settings.timeout_secs,
        settings.data_dir.as_deref().unwrap_or("(none)")
    );
    ExitCode::SUCCESS
}
