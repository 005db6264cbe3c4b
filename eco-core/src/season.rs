use crate::error::EcoError;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Meteorological season using the Southern-Hemisphere month mapping.
///
/// December is attributed to the season of the *same* calendar year as
/// January and February, so `(2020, Summer)` collects Jan 2020, Feb 2020
/// and Dec 2020. There is no water-year style shift.
#[derive(Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Copy, Clone, Serialize, Deserialize)]
pub enum Season {
    Summer,
    Autumn,
    Winter,
    Spring,
}

impl Season {
    /// Every season, in calendar order starting with the summer months.
    pub const ALL: [Season; 4] = [Season::Summer, Season::Autumn, Season::Winter, Season::Spring];

    /// Map a calendar month (1 = January) to its season.
    pub fn from_month(month: u32) -> Result<Season, EcoError> {
        match month {
            12 | 1 | 2 => Ok(Season::Summer),
            3..=5 => Ok(Season::Autumn),
            6..=8 => Ok(Season::Winter),
            9..=11 => Ok(Season::Spring),
            _ => Err(EcoError::InvalidMonth(month)),
        }
    }

    /// Season of a date; total because chrono months are always 1..=12.
    pub fn from_date(date: &NaiveDate) -> Season {
        match date.month() {
            12 | 1 | 2 => Season::Summer,
            3..=5 => Season::Autumn,
            6..=8 => Season::Winter,
            _ => Season::Spring,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Season::Summer => "Summer",
            Season::Autumn => "Autumn",
            Season::Winter => "Winter",
            Season::Spring => "Spring",
        }
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Season {
    type Err = EcoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Season::ALL
            .into_iter()
            .find(|season| season.as_str() == s.trim())
            .ok_or_else(|| EcoError::UnknownSeason(s.to_string()))
    }
}
