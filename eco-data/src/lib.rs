//! Seasonal aggregation and anomaly trends for environmental metric tables.
//!
//! Every function takes its input tables by reference and returns new
//! tables, so each stage of the pipeline can be checked on its own.
//!
//! # Stages
//!
//! - [`calendar::with_calendar_columns`] derives `year` and `season` from
//!   the monthly `date` column.
//! - [`aggregate::seasonal_means`] averages a monthly metric per
//!   (year, season).
//! - [`join::left_join`] attaches the seasonal means to a seasonal table.
//! - [`trend::with_trend_and_anomaly`] smooths a column per season with a
//!   centered rolling mean and records the deviation from it.
//!
//! # Season convention
//!
//! Seasons follow the Southern-Hemisphere mapping of [`eco_core::Season`].
//! December stays in its own calendar year, so the Summer of 2020 is made of
//! January, February and December 2020.

pub mod aggregate;
pub mod calendar;
pub mod join;
pub mod trend;
