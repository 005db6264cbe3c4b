//! Plot-ready point series extracted from tables.
//!
//! Rows with a missing coordinate are dropped, the way the plotted line or
//! scatter would skip them.

use chrono::{Duration, NaiveDate};
use eco_core::{EcoError, Table};
use eco_utils::dates::parse_flexible_date;
use itertools::{Itertools, MinMaxResult};
use std::collections::BTreeMap;
use std::ops::Range;

use crate::error::Result;

/// Points of one category in a grouped chart.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupSeries {
    pub group: String,
    /// Sorted by x; repeated x values are averaged.
    pub points: Vec<(f64, f64)>,
}

/// Least-squares line `y = slope * x + intercept`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
}

impl LinearFit {
    pub fn at(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

/// `(date, y)` pairs sorted by date.
pub fn time_series_points(table: &Table, x: &str, y: &str) -> Result<Vec<(NaiveDate, f64)>> {
    let dates = table.text_column(x)?;
    let values = table.numeric_column(y)?;
    let mut points = Vec::with_capacity(dates.len());
    for (row, (raw, value)) in dates.iter().zip(values).enumerate() {
        let Some(value) = value else { continue };
        if raw.trim().is_empty() {
            continue;
        }
        let date = parse_flexible_date(raw).map_err(|e| EcoError::DateParse {
            row,
            message: e.to_string(),
        })?;
        points.push((date, value));
    }
    points.sort_by_key(|(date, _)| *date);
    Ok(points)
}

/// One series per distinct `group` value, in order of first appearance.
pub fn grouped_points(table: &Table, x: &str, y: &str, group: &str) -> Result<Vec<GroupSeries>> {
    let xs = table.numeric_column(x)?;
    let ys = table.numeric_column(y)?;
    let groups = table.text_column(group)?;

    let mut order: Vec<&str> = Vec::new();
    // x is keyed by its bit pattern; f64 has no total order for BTreeMap
    let mut sums: Vec<BTreeMap<i64, (f64, f64, usize)>> = Vec::new();
    for ((x, y), name) in xs.into_iter().zip(ys).zip(groups) {
        let name = name.trim();
        if name.is_empty() {
            continue;
        }
        let slot = match order.iter().position(|g| *g == name) {
            Some(slot) => slot,
            None => {
                order.push(name);
                sums.push(BTreeMap::new());
                order.len() - 1
            }
        };
        if let (Some(x), Some(y)) = (x, y) {
            let entry = sums[slot].entry(sortable_key(x)).or_insert((x, 0.0, 0));
            entry.1 += y;
            entry.2 += 1;
        }
    }

    Ok(order
        .into_iter()
        .zip(sums)
        .map(|(name, by_x)| GroupSeries {
            group: name.to_string(),
            points: by_x
                .into_values()
                .map(|(x, sum, count)| (x, sum / count as f64))
                .collect(),
        })
        .collect())
}

/// Map an f64 onto an i64 whose ordering matches the float ordering.
fn sortable_key(value: f64) -> i64 {
    let bits = value.to_bits() as i64;
    if bits < 0 {
        bits ^ i64::MAX
    } else {
        bits
    }
}

/// Every row where both `x` and `y` are present.
pub fn scatter_points(table: &Table, x: &str, y: &str) -> Result<Vec<(f64, f64)>> {
    let xs = table.numeric_column(x)?;
    let ys = table.numeric_column(y)?;
    Ok(xs
        .into_iter()
        .zip(ys)
        .filter_map(|pair| match pair {
            (Some(x), Some(y)) => Some((x, y)),
            _ => None,
        })
        .collect())
}

/// Ordinary least-squares fit; `None` with fewer than two distinct x values.
pub fn linear_fit(points: &[(f64, f64)]) -> Option<LinearFit> {
    if points.len() < 2 {
        return None;
    }
    let n = points.len() as f64;
    let mean_x = points.iter().map(|(x, _)| x).sum::<f64>() / n;
    let mean_y = points.iter().map(|(_, y)| y).sum::<f64>() / n;
    let sxx = points.iter().map(|(x, _)| (x - mean_x).powi(2)).sum::<f64>();
    if sxx == 0.0 {
        return None;
    }
    let sxy = points
        .iter()
        .map(|(x, y)| (x - mean_x) * (y - mean_y))
        .sum::<f64>();
    let slope = sxy / sxx;
    Some(LinearFit {
        slope,
        intercept: mean_y - slope * mean_x,
    })
}

/// Axis range covering the finite `values` with 10% headroom on both sides;
/// a flat or empty series gets a unit-wide range. The result is always
/// finite, since the backend cannot lay out an infinite axis.
pub fn padded_range(values: impl Iterator<Item = f64>) -> Range<f64> {
    match values.filter(|v| v.is_finite()).minmax() {
        MinMaxResult::NoElements => 0.0..1.0,
        MinMaxResult::OneElement(v) => (v - 1.0)..(v + 1.0),
        MinMaxResult::MinMax(min, max) => {
            let span = max - min;
            if span.abs() < 1e-9 {
                (min - 1.0)..(max + 1.0)
            } else {
                let (start, end) = (min - span * 0.1, max + span * 0.1);
                if start.is_finite() && end.is_finite() {
                    start..end
                } else {
                    min..max
                }
            }
        }
    }
}

/// Date axis range covering `dates` with a two-week margin.
pub fn padded_date_range(dates: impl Iterator<Item = NaiveDate>) -> Range<NaiveDate> {
    let margin = Duration::days(14);
    match dates.minmax() {
        MinMaxResult::NoElements => {
            let epoch = NaiveDate::default();
            epoch..(epoch + Duration::days(365))
        }
        MinMaxResult::OneElement(d) => (d - margin)..(d + margin),
        MinMaxResult::MinMax(min, max) => (min - margin)..(max + margin),
    }
}
