//! Shared utility functions for the seasonal metrics crates.

/// Date utility functions
pub mod dates {
    use crate::error::DateError;
    use chrono::{NaiveDate, NaiveDateTime};

    /// Date-only layouts accepted in the monthly metrics CSV.
    const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%Y/%m/%d"];

    /// Timestamp layouts accepted in the monthly metrics CSV.
    const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

    /// Format a NaiveDate as "YYYY-MM-DD"
    pub fn format_date(date: &NaiveDate) -> String {
        date.format("%Y-%m-%d").to_string()
    }

    /// Parse a date the way exported metric tables write them.
    ///
    /// Accepts plain dates, timestamps (time part dropped) and
    /// month-only "YYYY-MM" values, which map to the first of the month.
    pub fn parse_flexible_date(s: &str) -> anyhow::Result<NaiveDate> {
        let s = s.trim();
        for format in DATE_FORMATS {
            if let Ok(date) = NaiveDate::parse_from_str(s, format) {
                return Ok(date);
            }
        }
        for format in DATETIME_FORMATS {
            if let Ok(timestamp) = NaiveDateTime::parse_from_str(s, format) {
                return Ok(timestamp.date());
            }
        }
        // "2021-03" has no day component; chrono needs one to build a date
        if let Ok(date) = NaiveDate::parse_from_str(&format!("{s}-01"), "%Y-%m-%d") {
            return Ok(date);
        }
        Err(DateError(s.to_string()).into())
    }

}

/// Axis and legend label helpers
pub mod labels {
    /// Turn a column name into a human label: underscores become spaces and
    /// each word is capitalised, e.g. `annual_water_extent_km2` becomes
    /// `Annual Water Extent Km2`.
    ///
    /// A word starts after any non-alphabetic character, so `evi2x` becomes
    /// `Evi2X`.
    pub fn column_label(column: &str) -> String {
        let mut label = String::with_capacity(column.len());
        let mut previous_alphabetic = false;
        for c in column.chars() {
            let c = if c == '_' { ' ' } else { c };
            if c.is_alphabetic() {
                if previous_alphabetic {
                    label.extend(c.to_lowercase());
                } else {
                    label.extend(c.to_uppercase());
                }
                previous_alphabetic = true;
            } else {
                label.push(c);
                previous_alphabetic = false;
            }
        }
        label
    }

}

/// Error types
pub mod error {
    use std::fmt;

    #[derive(Debug)]
    pub struct DateError(pub String);

    impl fmt::Display for DateError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "Date error: unrecognised date '{}'", self.0)
        }
    }

    impl std::error::Error for DateError {}
}
