//! Column names shared by the metric tables.

pub const DATE: &str = "date";
pub const YEAR: &str = "year";
pub const SEASON: &str = "season";

pub const MEAN_EVI: &str = "mean_evi";
pub const MEAN_PRECIP: &str = "mean_precip";
pub const MEAN_GROUNDWATER: &str = "mean_groundwater";
pub const WATER_EXTENT: &str = "annual_water_extent_km2";

pub const EVI_ANOMALY: &str = "evi_anomaly";
pub const GW_ANOMALY: &str = "gw_anomaly";

/// Smoothed water extent per season.
pub const WATER_EXTENT_TREND: &str = "annual_water_extent_km2_trend";
/// Water extent minus its trend.
pub const WATER_EXTENT_ANOMALY: &str = "annual_water_extent_km2_anomaly";

/// Suffixes given to a clashing non-key column during a join.
pub const LEFT_SUFFIX: &str = "_x";
pub const RIGHT_SUFFIX: &str = "_y";

/// Water-extent columns a previous join onto the anomaly table left behind.
pub const SUFFIXED_WATER_EXTENT: [&str; 2] = ["annual_water_extent_km2_x", "annual_water_extent_km2_y"];

pub const MONTHLY_REQUIRED: [&str; 4] = [DATE, MEAN_EVI, MEAN_PRECIP, WATER_EXTENT];
pub const SEASONAL_REQUIRED: [&str; 5] = [YEAR, SEASON, MEAN_EVI, MEAN_PRECIP, MEAN_GROUNDWATER];
pub const ANOMALY_REQUIRED: [&str; 7] = [
    YEAR,
    SEASON,
    MEAN_EVI,
    MEAN_PRECIP,
    MEAN_GROUNDWATER,
    EVI_ANOMALY,
    GW_ANOMALY,
];
