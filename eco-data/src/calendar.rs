//! Calendar columns derived from the monthly `date` column.

use chrono::Datelike;
use eco_core::{columns, EcoError, Result, Season, Table};
use eco_utils::dates::parse_flexible_date;

/// Copy of `monthly` with `year` and `season` columns derived from `date`.
///
/// Existing `year`/`season` columns are overwritten. A row with an empty
/// date gets empty calendar cells and so joins no season group; a date
/// that cannot be parsed is an error.
pub fn with_calendar_columns(monthly: &Table) -> Result<Table> {
    let dates = monthly.text_column(columns::DATE)?;
    let mut years = Vec::with_capacity(dates.len());
    let mut seasons = Vec::with_capacity(dates.len());
    let mut undated = 0usize;
    for (row, raw) in dates.iter().enumerate() {
        if raw.trim().is_empty() {
            undated += 1;
            years.push(String::new());
            seasons.push(String::new());
            continue;
        }
        let date = parse_flexible_date(raw).map_err(|e| EcoError::DateParse {
            row,
            message: e.to_string(),
        })?;
        years.push(date.year().to_string());
        seasons.push(Season::from_date(&date).to_string());
    }
    if undated > 0 {
        log::warn!(
            "{}: {} rows without a date are left out of seasonal groups",
            monthly.name(),
            undated
        );
    }
    monthly
        .with_column(columns::YEAR, years)?
        .with_column(columns::SEASON, seasons)
}
