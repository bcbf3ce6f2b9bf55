use std::fmt;
use std::str::FromStr;

use crate::error::AppError;

const SECONDS_HOUR: i64 = 60 * 60;
const SECONDS_DAY: i64 = SECONDS_HOUR * 24;
const SECONDS_WEEK: i64 = SECONDS_DAY * 7;
const SECONDS_MONTH: i64 = SECONDS_DAY * 30;
const SECONDS_YEAR: i64 = SECONDS_DAY * 365;

/// How far back the historical comparison point lies. Offsets are fixed
/// second counts, not calendar arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Lookback {
    Hour,
    #[default]
    Day,
    Week,
    Month,
    Year,
}

impl Lookback {
    pub const ALL: [Lookback; 5] = [
        Lookback::Hour,
        Lookback::Day,
        Lookback::Week,
        Lookback::Month,
        Lookback::Year,
    ];

    pub fn seconds(self) -> i64 {
        match self {
            Lookback::Hour => SECONDS_HOUR,
            Lookback::Day => SECONDS_DAY,
            Lookback::Week => SECONDS_WEEK,
            Lookback::Month => SECONDS_MONTH,
            Lookback::Year => SECONDS_YEAR,
        }
    }

    /// Unix timestamp of the comparison point relative to `now`.
    pub fn timestamp_before(self, now: i64) -> i64 {
        now - self.seconds()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Lookback::Hour => "hour",
            Lookback::Day => "day",
            Lookback::Week => "week",
            Lookback::Month => "month",
            Lookback::Year => "year",
        }
    }
}

impl fmt::Display for Lookback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Lookback {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim().to_lowercase();
        Lookback::ALL
            .into_iter()
            .find(|lookback| lookback.as_str() == token)
            .ok_or_else(|| {
                let valid = Lookback::ALL
                    .iter()
                    .map(|lookback| lookback.as_str())
                    .collect::<Vec<_>>()
                    .join(", ");
                AppError::config(format!("Invalid duration, expected one of: {valid}"))
            })
    }
}
