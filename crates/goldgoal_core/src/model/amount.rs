//! Amount input parsing.
//!
//! # Responsibility
//! - Turn free-text manual-add input into a finite `f64`.
//! - Offer a cheap pre-check for input fields.
//!
//! # Invariants
//! - `parse_amount` never yields NaN or infinity.
//! - `parse_amount` is authoritative; `is_amount_input` is advisory only.

use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

static PLAIN_DECIMAL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[+-]?(?:\d+(?:\.\d*)?|\.\d+)$").expect("valid plain decimal regex")
});

/// Error for manual amount input that is not a finite real number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AmountError {
    InvalidAmount(String),
}

impl Display for AmountError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidAmount(input) => write!(f, "invalid amount: `{input}`"),
        }
    }
}

impl Error for AmountError {}

/// Parses user-supplied amount text.
///
/// Leading/trailing whitespace is ignored. Empty, unparsable, NaN and
/// infinite values are rejected with `AmountError::InvalidAmount`.
pub fn parse_amount(input: &str) -> Result<f64, AmountError> {
    let trimmed = input.trim();
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(AmountError::InvalidAmount(trimmed.to_string())),
    }
}

/// Returns whether `input` looks like a plain decimal number (`12`, `-3.5`,
/// `.25`).
///
/// Intended for enabling/disabling an "Add" button before submission.
pub fn is_amount_input(input: &str) -> bool {
    PLAIN_DECIMAL_RE.is_match(input.trim())
}
