//! Load, reshape and persist the metric tables.

use anyhow::Context;
use eco_core::columns::{
    self, ANOMALY_REQUIRED, MONTHLY_REQUIRED, SEASONAL_REQUIRED, SUFFIXED_WATER_EXTENT,
    WATER_EXTENT, WATER_EXTENT_ANOMALY, WATER_EXTENT_TREND,
};
use eco_core::config::{PipelineConfig, ANOMALIES_FILE, MERGED_FILE};
use eco_core::Table;
use eco_data::aggregate::{seasonal_means, seasonal_means_table};
use eco_data::calendar::with_calendar_columns;
use eco_data::join::{joined_column_name, left_join};
use eco_data::trend::with_trend_and_anomaly;
use eco_utils::dates::{format_date, parse_flexible_date};
use log::{debug, info};
use std::path::Path;

/// Join keys between the seasonal tables and the seasonal means.
pub const SEASON_KEYS: [&str; 2] = [columns::YEAR, columns::SEASON];

/// The three tables as read from the data directory.
#[derive(Debug, Clone)]
pub struct SourceTables {
    pub monthly: Table,
    pub seasonal: Table,
    pub anomalies: Table,
}

/// Tables after aggregation, joining and trend recomputation.
#[derive(Debug, Clone)]
pub struct PreparedTables {
    /// Monthly table with `year` and `season` added.
    pub monthly: Table,
    /// Seasonal table with the seasonal water-extent means joined on.
    pub merged: Table,
    /// Anomaly table, sorted, with the water-extent trend and anomaly.
    pub anomalies: Table,
    /// Column of `merged` holding the joined water extent.
    pub merged_water_extent: String,
}

fn read_table(path: &Path, required: &[&str]) -> anyhow::Result<Table> {
    let table = Table::read_csv(path).with_context(|| format!("reading {}", path.display()))?;
    table
        .require_columns(required)
        .with_context(|| format!("checking columns of {}", path.display()))?;
    info!("Loaded {} rows from {}", table.len(), path.display());
    Ok(table)
}

/// First and last parseable monthly date, for the progress log.
fn coverage(monthly: &Table) -> anyhow::Result<Option<String>> {
    let dates = monthly
        .text_column(columns::DATE)?
        .into_iter()
        .filter_map(|d| parse_flexible_date(d).ok())
        .collect::<Vec<_>>();
    Ok(dates
        .iter()
        .min()
        .zip(dates.iter().max())
        .map(|(first, last)| format!("{} to {}", format_date(first), format_date(last))))
}

/// Read the monthly, seasonal and anomaly tables and check their columns.
pub fn load(config: &PipelineConfig) -> anyhow::Result<SourceTables> {
    Ok(SourceTables {
        monthly: read_table(&config.monthly_path(), &MONTHLY_REQUIRED)?,
        seasonal: read_table(&config.seasonal_path(), &SEASONAL_REQUIRED)?,
        anomalies: read_table(&config.anomalies_path(), &ANOMALY_REQUIRED)?,
    })
}

/// Derive the seasonal water-extent means, join them onto both seasonal
/// tables and recompute the water-extent trend and anomaly.
///
/// The anomaly table is rewritten in place on every run, so the `_x`/`_y`
/// water-extent copies an earlier run produced are dropped before joining.
/// A plain `annual_water_extent_km2` column is kept and suffixed as usual.
pub fn prepare(sources: &SourceTables) -> anyhow::Result<PreparedTables> {
    if let Some(span) = coverage(&sources.monthly)? {
        info!("Monthly data covers {span}");
    }
    let monthly = with_calendar_columns(&sources.monthly)?;
    let means = seasonal_means(&monthly, WATER_EXTENT)?;
    info!("Aggregated {} into {} seasonal means", WATER_EXTENT, means.len());
    let means_table = seasonal_means_table(&means, WATER_EXTENT)?;

    let merged_water_extent = joined_column_name(&sources.seasonal, WATER_EXTENT, &SEASON_KEYS);
    let merged = left_join(&sources.seasonal, &means_table, &SEASON_KEYS)?.renamed(MERGED_FILE);

    let previous = sources.anomalies.without_columns(&SUFFIXED_WATER_EXTENT);
    let dropped = sources.anomalies.headers().len() - previous.headers().len();
    if dropped > 0 {
        debug!("{}: dropped {} earlier water-extent columns", previous.name(), dropped);
    }
    let anomaly_source = joined_column_name(&previous, WATER_EXTENT, &SEASON_KEYS);
    let joined = left_join(&previous, &means_table, &SEASON_KEYS)?;
    let anomalies = with_trend_and_anomaly(
        &joined,
        &anomaly_source,
        WATER_EXTENT_TREND,
        WATER_EXTENT_ANOMALY,
    )?
    .renamed(ANOMALIES_FILE);

    Ok(PreparedTables {
        monthly,
        merged,
        anomalies,
        merged_water_extent,
    })
}

/// Write the merged table and overwrite the anomaly table in the data
/// directory.
pub fn persist(config: &PipelineConfig, prepared: &PreparedTables) -> anyhow::Result<()> {
    let merged_path = config.merged_path();
    prepared
        .merged
        .write_csv(&merged_path)
        .with_context(|| format!("writing {}", merged_path.display()))?;
    let anomalies_path = config.anomalies_path();
    prepared
        .anomalies
        .write_csv(&anomalies_path)
        .with_context(|| format!("writing {}", anomalies_path.display()))?;
    info!(
        "Wrote {} and {}",
        merged_path.display(),
        anomalies_path.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(name: &str, csv: &str) -> Table {
        Table::from_reader(name, csv.as_bytes()).unwrap()
    }

    fn sources(anomalies_csv: &str) -> SourceTables {
        SourceTables {
            monthly: table(
                "monthly",
                "date,mean_evi,mean_precip,annual_water_extent_km2\n\
                 2020-01-01,0.1,1,10\n2020-02-01,0.1,1,20\n2020-12-01,0.1,1,30\n\
                 2020-06-01,0.1,1,4\n2021-01-01,0.1,1,50\n",
            ),
            seasonal: table(
                "seasonal",
                "year,season,mean_evi,mean_precip,mean_groundwater\n\
                 2020,Summer,0.1,1,2\n2020,Winter,0.1,1,2\n2020,Spring,0.1,1,2\n2021,Summer,0.1,1,2\n",
            ),
            anomalies: table("anomalies", anomalies_csv),
        }
    }

    const ANOMALIES: &str = "year,season,mean_evi,mean_precip,mean_groundwater,evi_anomaly,gw_anomaly\n\
        2021,Summer,0.1,1,2,0.0,0.0\n2020,Winter,0.1,1,2,0.0,0.0\n2020,Summer,0.1,1,2,0.0,0.0\n";

    #[test]
    fn prepare_joins_seasonal_means() {
        let prepared = prepare(&sources(ANOMALIES)).unwrap();
        assert_eq!(prepared.merged_water_extent, "annual_water_extent_km2");
        assert_eq!(prepared.merged.name(), MERGED_FILE);
        assert_eq!(
            prepared.merged.numeric_column("annual_water_extent_km2").unwrap(),
            vec![Some(20.0), Some(4.0), None, Some(50.0)]
        );
        assert!(prepared.monthly.has_column("season"));
    }

    #[test]
    fn prepare_sorts_and_adds_trend_columns() {
        let prepared = prepare(&sources(ANOMALIES)).unwrap();
        let anomalies = &prepared.anomalies;
        assert_eq!(anomalies.text_column("year").unwrap(), vec!["2020", "2020", "2021"]);
        assert_eq!(
            anomalies.text_column("season").unwrap(),
            vec!["Summer", "Winter", "Summer"]
        );
        assert_eq!(
            anomalies.numeric_column(WATER_EXTENT_TREND).unwrap(),
            vec![Some(35.0), Some(4.0), Some(35.0)]
        );
        assert_eq!(
            anomalies.numeric_column(WATER_EXTENT_ANOMALY).unwrap(),
            vec![Some(-15.0), Some(0.0), Some(15.0)]
        );
    }

    #[test]
    fn coverage_spans_first_to_last_date() {
        let sources = sources(ANOMALIES);
        assert_eq!(
            coverage(&sources.monthly).unwrap().as_deref(),
            Some("2020-01-01 to 2021-01-01")
        );
    }

    #[test]
    fn existing_water_extent_column_is_suffixed() {
        let with_extent = "year,season,mean_evi,mean_precip,mean_groundwater,evi_anomaly,gw_anomaly,annual_water_extent_km2\n\
            2020,Summer,0.1,1,2,0.0,0.0,999\n";
        let prepared = prepare(&sources(with_extent)).unwrap();
        let anomalies = &prepared.anomalies;
        assert_eq!(
            anomalies.numeric_column("annual_water_extent_km2_x").unwrap(),
            vec![Some(999.0)]
        );
        assert_eq!(
            anomalies.numeric_column("annual_water_extent_km2_y").unwrap(),
            vec![Some(20.0)]
        );
        // the trend follows the freshly joined column, not the stale one
        assert_eq!(
            anomalies.numeric_column(WATER_EXTENT_TREND).unwrap(),
            vec![Some(20.0)]
        );
    }

    #[test]
    fn earlier_suffixed_columns_are_replaced() {
        let rerun = "year,season,mean_evi,mean_precip,mean_groundwater,evi_anomaly,gw_anomaly,\
            annual_water_extent_km2_x,annual_water_extent_km2_y,annual_water_extent_km2_trend\n\
            2020,Summer,0.1,1,2,0.0,0.0,1,2,3\n";
        let prepared = prepare(&sources(rerun)).unwrap();
        let anomalies = &prepared.anomalies;
        assert!(!anomalies.has_column("annual_water_extent_km2_x"));
        assert!(!anomalies.has_column("annual_water_extent_km2_y"));
        assert_eq!(
            anomalies.numeric_column(WATER_EXTENT).unwrap(),
            vec![Some(20.0)]
        );
        assert_eq!(
            anomalies.numeric_column(WATER_EXTENT_TREND).unwrap(),
            vec![Some(20.0)]
        );
    }
}
