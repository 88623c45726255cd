//! Domain error types.

/// Top-level error type for holdrank.
///
/// The first four variants are per-security pipeline failures: they abort the
/// pipeline for one security only and never affect its siblings.
#[derive(Debug, thiserror::Error)]
pub enum HoldrankError {
    #[error("data unavailable from {source_ref}: {reason}")]
    DataUnavailable { source_ref: String, reason: String },

    #[error("schema mismatch: {reason}")]
    SchemaMismatch { reason: String },

    #[error("optimal index {index} out of range for {security} ({rows} rows)")]
    IndexOutOfRange {
        security: String,
        index: usize,
        rows: usize,
    },

    #[error("cannot parse percentage {value:?}")]
    ParseError { value: String },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl HoldrankError {
    pub fn schema(reason: impl Into<String>) -> Self {
        HoldrankError::SchemaMismatch {
            reason: reason.into(),
        }
    }

    pub fn unavailable(source_ref: &str, reason: impl std::fmt::Display) -> Self {
        HoldrankError::DataUnavailable {
            source_ref: source_ref.to_string(),
            reason: reason.to_string(),
        }
    }
}

impl From<&HoldrankError> for std::process::ExitCode {
    fn from(err: &HoldrankError) -> Self {
        let code: u8 = match err {
            HoldrankError::Io(_) => 1,
            HoldrankError::ConfigParse { .. }
            | HoldrankError::ConfigMissing { .. }
            | HoldrankError::ConfigInvalid { .. } => 2,
            HoldrankError::DataUnavailable { .. } | HoldrankError::SchemaMismatch { .. } => 5,
            HoldrankError::IndexOutOfRange { .. } | HoldrankError::ParseError { .. } => 6,
        };
        std::process::ExitCode::from(code)
    }
}
