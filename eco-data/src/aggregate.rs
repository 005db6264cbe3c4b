//! Per-(year, season) means of a monthly metric.

use eco_core::table::parse_number;
use eco_core::{columns, Result, Season, Table};
use serde::Serialize;
use std::collections::BTreeMap;

/// Mean of one metric over the months of a (year, season).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeasonalMean {
    pub year: i32,
    pub season: Season,
    /// `None` when every monthly value in the group is missing.
    pub value: Option<f64>,
}

#[derive(Default)]
struct Accumulator {
    sum: f64,
    count: usize,
}

/// Average `metric` over every (year, season) present in `monthly`.
///
/// `monthly` must already carry the calendar columns from
/// [`crate::calendar::with_calendar_columns`]. Missing metric values are
/// skipped; rows without a year or season belong to no group. Results are
/// ordered by year, then season name.
pub fn seasonal_means(monthly: &Table, metric: &str) -> Result<Vec<SeasonalMean>> {
    let years = monthly.text_column(columns::YEAR)?;
    let seasons = monthly.text_column(columns::SEASON)?;
    let values = monthly.numeric_column(metric)?;

    // keyed by the season name so groups sort the way the names do
    let mut groups: BTreeMap<(i32, &'static str), (Season, Accumulator)> = BTreeMap::new();
    for ((year, season), value) in years.iter().zip(seasons.iter()).zip(values) {
        let year = match parse_number(year) {
            Some(y) => y as i32,
            None => continue,
        };
        let season: Season = match season.trim() {
            "" => continue,
            name => name.parse()?,
        };
        let (_, acc) = groups
            .entry((year, season.as_str()))
            .or_insert_with(|| (season, Accumulator::default()));
        if let Some(v) = value {
            acc.sum += v;
            acc.count += 1;
        }
    }

    let means = groups
        .into_iter()
        .map(|((year, _), (season, acc))| SeasonalMean {
            year,
            season,
            value: (acc.count > 0).then(|| acc.sum / acc.count as f64),
        })
        .collect::<Vec<_>>();
    log::debug!(
        "{}: {} seasonal groups for {}",
        monthly.name(),
        means.len(),
        metric
    );
    Ok(means)
}

/// Seasonal means as a `year,season,<metric>` table ready to be joined.
pub fn seasonal_means_table(means: &[SeasonalMean], metric: &str) -> Result<Table> {
    Table::from_records(
        &format!("seasonal {metric}"),
        &[columns::YEAR, columns::SEASON, metric],
        means,
    )
}
