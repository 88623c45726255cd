//! Core domain types and logic.

pub mod error;
pub mod percent;
pub mod raw_table;
pub mod metrics_table;
pub mod normalizer;
pub mod roster;
pub mod selector;
pub mod ranker;
pub mod pipeline;
pub mod config_validation;
