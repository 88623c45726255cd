//! Configuration validation.
//!
//! Validates the roster and pipeline sections before any data is loaded.

use crate::domain::error::HoldrankError;
use crate::domain::metrics_table::HOLDING_PERIODS;
use crate::domain::roster::{Roster, SecurityIdentity};
use crate::ports::config_port::ConfigPort;

pub const PIPELINE_SECTION: &str = "pipeline";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Pipeline settings read from `[pipeline]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineSettings {
    pub data_dir: Option<String>,
    pub parallel: bool,
    pub timeout_secs: u64,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            data_dir: None,
            parallel: true,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

pub fn validate_config(config: &dyn ConfigPort) -> Result<(Roster, PipelineSettings), HoldrankError> {
    let settings = validate_pipeline_config(config)?;
    let roster = Roster::from_config(config)?;
    if roster.count() == 0 {
        return Err(HoldrankError::ConfigInvalid {
            section: "roster".into(),
            key: "securities".into(),
            reason: "roster is empty".into(),
        });
    }
    Ok((roster, settings))
}

pub fn validate_pipeline_config(config: &dyn ConfigPort) -> Result<PipelineSettings, HoldrankError> {
    if let Some(value) = config.get_string(PIPELINE_SECTION, "parallel") {
        if !matches!(
            value.trim().to_lowercase().as_str(),
            "true" | "yes" | "1" | "false" | "no" | "0"
        ) {
            return Err(HoldrankError::ConfigInvalid {
                section: PIPELINE_SECTION.into(),
                key: "parallel".into(),
                reason: format!("{value:?} is not a boolean"),
            });
        }
    }

    let data_dir = match config.get_string(PIPELINE_SECTION, "data_dir") {
        Some(dir) if dir.trim().is_empty() => {
            return Err(HoldrankError::ConfigInvalid {
                section: PIPELINE_SECTION.into(),
                key: "data_dir".into(),
                reason: "data_dir must not be empty".into(),
            });
        }
        other => other.map(|d| d.trim().to_string()),
    };

    let timeout = config.get_int(PIPELINE_SECTION, "timeout_secs", DEFAULT_TIMEOUT_SECS as i64);
    if timeout <= 0 {
        return Err(HoldrankError::ConfigInvalid {
            section: PIPELINE_SECTION.into(),
            key: "timeout_secs".into(),
            reason: "timeout_secs must be positive".into(),
        });
    }

    Ok(PipelineSettings {
        data_dir,
        parallel: config.get_bool(PIPELINE_SECTION, "parallel", true),
        timeout_secs: timeout as u64,
    })
}

/// Roster entries whose rule cannot select a row of a well-formed table.
///
/// These are not rejected up front: the data and the rules can be updated
/// independently, and selection reports the mismatch per security.
pub fn out_of_range_rules(roster: &Roster) -> Vec<&SecurityIdentity> {
    roster
        .securities
        .iter()
        .filter(|s| s.optimal_index >= HOLDING_PERIODS)
        .collect()
}
