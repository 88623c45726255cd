//! Security roster: display names, data sources and optimal-row rules.
//!
//! The roster is static configuration. It is read once before a run, either
//! from an INI file through [`ConfigPort`] or from the built-in table.

use crate::domain::error::HoldrankError;
use crate::ports::config_port::ConfigPort;
use std::collections::HashSet;

pub const ROSTER_SECTION: &str = "roster";
pub const ROSTER_KEY: &str = "securities";

const DEFAULT_SOURCE_BASE: &str =
    "https://raw.githubusercontent.com/NathanLever7/TradingStrategies/main";

/// Built-in roster: ticker, display name, zero-based optimal row.
const DEFAULT_ROSTER: &[(&str, &str, usize)] = &[
    ("VUSA", "VUSA (S&P 500)", 6),
    ("INRG", "INRG (iShares Global Clean Energy)", 4),
    ("VUKE", "VUKE (FTSE 100)", 6),
    ("EQQQ", "EQQQ (Nasdaq 100)", 6),
    ("IUKP", "IUKP (UK Property)", 4),
    ("VWRL", "VWRL (FTSE All-World)", 6),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecurityIdentity {
    pub ticker: String,
    pub name: String,
    pub source: String,
    pub optimal_index: usize,
}

impl SecurityIdentity {
    /// Holding period the rule points at (index + 1).
    pub fn optimal_holding_days(&self) -> usize {
        self.optimal_index + 1
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Roster {
    pub securities: Vec<SecurityIdentity>,
}

impl Roster {
    pub fn builtin() -> Self {
        let securities = DEFAULT_ROSTER
            .iter()
            .map(|&(ticker, name, optimal_index)| SecurityIdentity {
                ticker: ticker.to_string(),
                name: name.to_string(),
                source: format!("{DEFAULT_SOURCE_BASE}/{ticker}_Metrics.csv"),
                optimal_index,
            })
            .collect();
        Self { securities }
    }

    /// Build a roster from `[roster] securities = A, B` plus one section per ticker.
    pub fn from_config(config: &dyn ConfigPort) -> Result<Self, HoldrankError> {
        let list = config
            .get_string(ROSTER_SECTION, ROSTER_KEY)
            .ok_or_else(|| HoldrankError::ConfigMissing {
                section: ROSTER_SECTION.into(),
                key: ROSTER_KEY.into(),
            })?;
        let tickers = parse_tickers(&list).map_err(|e| HoldrankError::ConfigInvalid {
            section: ROSTER_SECTION.into(),
            key: ROSTER_KEY.into(),
            reason: e.to_string(),
        })?;

        let mut securities = Vec::with_capacity(tickers.len());
        let mut names = HashSet::new();
        for ticker in tickers {
            let section = ticker.to_lowercase();
            let required = |key: &str| {
                config
                    .get_string(&section, key)
                    .filter(|v| !v.trim().is_empty())
                    .ok_or_else(|| HoldrankError::ConfigMissing {
                        section: section.clone(),
                        key: key.into(),
                    })
            };
            let name = required("name")?;
            let source = required("source")?;
            let index_raw = required("optimal_index")?;
            let optimal_index =
                index_raw
                    .trim()
                    .parse::<usize>()
                    .map_err(|_| HoldrankError::ConfigInvalid {
                        section: section.clone(),
                        key: "optimal_index".into(),
                        reason: format!("{index_raw:?} is not a non-negative integer"),
                    })?;

            if !names.insert(name.clone()) {
                return Err(HoldrankError::ConfigInvalid {
                    section,
                    key: "name".into(),
                    reason: format!("duplicate display name {name:?}"),
                });
            }

            securities.push(SecurityIdentity {
                ticker,
                name,
                source,
                optimal_index,
            });
        }

        Ok(Self { securities })
    }

    /// Look up by ticker (case-insensitive) or exact display name.
    pub fn find(&self, key: &str) -> Option<&SecurityIdentity> {
        let key = key.trim();
        self.securities
            .iter()
            .find(|s| s.ticker.eq_ignore_ascii_case(key) || s.name == key)
    }

    pub fn count(&self) -> usize {
        self.securities.len()
    }
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum RosterError {
    #[error("empty token in securities list")]
    EmptyToken,

    #[error("duplicate security: {0}")]
    DuplicateTicker(String),
}

pub fn parse_tickers(input: &str) -> Result<Vec<String>, RosterError> {
    let mut tickers = Vec::new();
    let mut seen = HashSet::new();

    for token in input.split(',') {
        let trimmed = token.trim();
        if trimmed.is_empty() {
            return Err(RosterError::EmptyToken);
        }
        let ticker = trimmed.to_uppercase();
        if !seen.insert(ticker.clone()) {
            return Err(RosterError::DuplicateTicker(ticker));
        }
        tickers.push(ticker);
    }

    Ok(tickers)
}
