//! Centered rolling-mean trends and the anomalies around them.

use eco_core::table::parse_number;
use eco_core::{columns, Result, Table};
use itertools::Itertools;
use std::cmp::Ordering;

/// Window length of the seasonal trend.
pub const TREND_WINDOW: usize = 3;
/// Fewest present values a window needs to produce a trend value.
pub const TREND_MIN_PERIODS: usize = 1;

/// Centered rolling mean over `values`.
///
/// The window at position `i` spans `i - window / 2` to
/// `i + (window - 1 - window / 2)`, clipped to the slice, so it shrinks at
/// either end. Missing values are skipped; a position whose window holds
/// fewer than `min_periods` present values (or none at all) is missing.
pub fn centered_rolling_mean(
    values: &[Option<f64>],
    window: usize,
    min_periods: usize,
) -> Vec<Option<f64>> {
    if window == 0 {
        return vec![None; values.len()];
    }
    let before = window / 2;
    let after = window - 1 - before;
    (0..values.len())
        .map(|i| {
            let start = i.saturating_sub(before);
            let end = (i + after + 1).min(values.len());
            let present = values[start..end].iter().flatten().collect::<Vec<_>>();
            if present.is_empty() || present.len() < min_periods {
                None
            } else {
                Some(present.iter().copied().sum::<f64>() / present.len() as f64)
            }
        })
        .collect()
}

/// Rolling mean computed separately within each group, in row order.
///
/// Rows whose group is `None` belong to no group and get no trend.
pub fn grouped_rolling_mean(
    values: &[Option<f64>],
    groups: &[Option<&str>],
    window: usize,
    min_periods: usize,
) -> Vec<Option<f64>> {
    let mut trend = vec![None; values.len()];
    let members = groups
        .iter()
        .enumerate()
        .filter_map(|(row, group)| group.map(|g| (g, row)))
        .into_group_map();
    for rows in members.values() {
        let series = rows.iter().map(|&row| values[row]).collect::<Vec<_>>();
        let smoothed = centered_rolling_mean(&series, window, min_periods);
        for (&row, value) in rows.iter().zip(smoothed) {
            trend[row] = value;
        }
    }
    trend
}

/// Elementwise `raw - trend`; missing when either side is.
pub fn anomalies(raw: &[Option<f64>], trend: &[Option<f64>]) -> Vec<Option<f64>> {
    raw.iter()
        .zip(trend)
        .map(|(r, t)| match (r, t) {
            (Some(r), Some(t)) => Some(r - t),
            _ => None,
        })
        .collect()
}

/// Missing keys sort after present ones.
fn missing_last<T: PartialOrd>(a: &Option<T>, b: &Option<T>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.partial_cmp(b).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Copy of `table` stably sorted by numeric year, then season name.
pub fn sorted_by_year_and_season(table: &Table) -> Result<Table> {
    let years = table.text_column(columns::YEAR)?;
    let seasons = table.text_column(columns::SEASON)?;
    let keys = years
        .iter()
        .zip(&seasons)
        .map(|(year, season)| {
            let season = season.trim();
            (parse_number(year), (!season.is_empty()).then_some(season))
        })
        .collect::<Vec<_>>();
    let mut order = (0..table.len()).collect::<Vec<_>>();
    order.sort_by(|&a, &b| {
        missing_last(&keys[a].0, &keys[b].0).then_with(|| missing_last(&keys[a].1, &keys[b].1))
    });
    Ok(table.with_row_order(&order))
}

/// Sort `table` by (year, season), smooth `source` per season with a
/// 3-period centered rolling mean and record both the trend and the
/// deviation from it.
///
/// The trend is written to `<trend_column>` and the deviation to
/// `<anomaly_column>`, replacing those columns when they already exist.
pub fn with_trend_and_anomaly(
    table: &Table,
    source: &str,
    trend_column: &str,
    anomaly_column: &str,
) -> Result<Table> {
    let sorted = sorted_by_year_and_season(table)?;
    let raw = sorted.numeric_column(source)?;
    let seasons = sorted.text_column(columns::SEASON)?;
    let groups = seasons
        .iter()
        .map(|s| {
            let s = s.trim();
            (!s.is_empty()).then_some(s)
        })
        .collect::<Vec<_>>();
    let trend = grouped_rolling_mean(&raw, &groups, TREND_WINDOW, TREND_MIN_PERIODS);
    let anomaly = anomalies(&raw, &trend);
    log::debug!(
        "{}: trend of {} over {} rows, {} without a value",
        sorted.name(),
        source,
        sorted.len(),
        trend.iter().filter(|t| t.is_none()).count()
    );
    sorted
        .with_numeric_column(trend_column, &trend)?
        .with_numeric_column(anomaly_column, &anomaly)
}
