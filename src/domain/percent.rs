//! Percentage values with a fixed three-decimal display form.

use crate::domain::error::HoldrankError;
use std::fmt;
use std::str::FromStr;

pub const DECIMALS: i32 = 3;

/// Round half-to-even at three decimal places.
pub fn round3(value: f64) -> f64 {
    let scale = 10f64.powi(DECIMALS);
    (value * scale).round_ties_even() / scale
}

/// A daily return expressed in percent, e.g. `0.123%`.
///
/// Holds the rounded numeric value so callers can sort on it directly;
/// `Display` produces the canonical string and `FromStr` reads it back.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Percent(f64);

impl Percent {
    pub fn new(value: f64) -> Self {
        Percent(round3(value))
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

impl fmt::Display for Percent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3}%", self.0)
    }
}

impl FromStr for Percent {
    type Err = HoldrankError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || HoldrankError::ParseError {
            value: s.to_string(),
        };
        let number = s.trim().strip_suffix('%').ok_or_else(err)?;
        let value: f64 = number.trim().parse().map_err(|_| err())?;
        if !value.is_finite() {
            return Err(err());
        }
        Ok(Percent::new(value))
    }
}
