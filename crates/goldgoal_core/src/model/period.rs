//! Goal period model.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Recurring window over which a goal's target is measured.
///
/// Serialized as its integer discriminant (`0=day, 1=week, 2=month`) to match
/// the persisted goal file schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Period {
    Day = 0,
    Week = 1,
    Month = 2,
}

impl Period {
    /// Every period in display order.
    pub const ALL: [Period; 3] = [Period::Day, Period::Week, Period::Month];

    /// Lowercase unit label, e.g. "every `day`".
    pub fn name(self) -> &'static str {
        match self {
            Self::Day => "day",
            Self::Week => "week",
            Self::Month => "month",
        }
    }

    /// Section heading label, e.g. "`Daily` goals".
    pub fn adjective(self) -> &'static str {
        match self {
            Self::Day => "Daily",
            Self::Week => "Weekly",
            Self::Month => "Monthly",
        }
    }
}

impl Display for Period {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl From<Period> for u8 {
    fn from(value: Period) -> Self {
        value as u8
    }
}

impl TryFrom<u8> for Period {
    type Error = UnknownPeriod;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Day),
            1 => Ok(Self::Week),
            2 => Ok(Self::Month),
            other => Err(UnknownPeriod(other)),
        }
    }
}

/// Raised when a persisted period discriminant is outside `0..=2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnknownPeriod(pub u8);

impl Display for UnknownPeriod {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown period value `{}`; expected 0|1|2", self.0)
    }
}

impl Error for UnknownPeriod {}
