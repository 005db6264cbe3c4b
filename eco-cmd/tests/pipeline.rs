use eco_core::columns::{WATER_EXTENT, WATER_EXTENT_ANOMALY, WATER_EXTENT_TREND};
use eco_core::config::PipelineConfig;
use eco_core::{Season, Table};
use eco_cmd::catalog::{chart_catalog, panel_catalog};
use eco_cmd::pipeline;
use std::collections::HashSet;
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

const EVI: f64 = 0.42;
const PRECIP: f64 = 3.5;
const GROUNDWATER: f64 = -1.25;
const WATER: f64 = 12.75;

fn write_monthly(data_dir: &Path, water: f64) {
    let mut monthly = String::from("date,mean_evi,mean_precip,annual_water_extent_km2\n");
    for year in [2020, 2021] {
        for month in 1..=12 {
            writeln!(monthly, "{year}-{month:02}-01,{EVI},{PRECIP},{water}").unwrap();
        }
    }
    fs::write(data_dir.join("Monthly_AllMetrics_WithWaterExtent.csv"), monthly).unwrap();
}

fn write_inputs(data_dir: &Path) {
    let mut seasonal = String::from("year,season,mean_evi,mean_precip,mean_groundwater\n");
    let mut anomalies = String::from(
        "year,season,mean_evi,mean_precip,mean_groundwater,evi_anomaly,gw_anomaly\n",
    );
    // newest first, so the anomaly table has to be re-sorted
    for year in [2021, 2020] {
        for season in Season::ALL {
            writeln!(seasonal, "{year},{season},{EVI},{PRECIP},{GROUNDWATER}").unwrap();
            writeln!(anomalies, "{year},{season},{EVI},{PRECIP},{GROUNDWATER},0.0,0.0").unwrap();
        }
    }

    fs::create_dir_all(data_dir).unwrap();
    write_monthly(data_dir, WATER);
    fs::write(data_dir.join("Seasonal_AllMetrics_AllSeasons.csv"), seasonal).unwrap();
    fs::write(data_dir.join("Seasonal_AllMetrics_WithAnomalies.csv"), anomalies).unwrap();
}

fn config(root: &Path) -> PipelineConfig {
    PipelineConfig::new(root.join("c"), root.join("plotty"), root.join("grouped_plotts"))
}

#[test]
fn constant_metrics_have_flat_trends() {
    let dir = tempfile::tempdir().unwrap();
    let config = config(dir.path());
    write_inputs(&config.data_dir);

    let sources = pipeline::load(&config).unwrap();
    let prepared = pipeline::prepare(&sources).unwrap();
    pipeline::persist(&config, &prepared).unwrap();

    // the left join keeps every seasonal row
    assert_eq!(prepared.merged.len(), sources.seasonal.len());
    assert_eq!(prepared.anomalies.len(), sources.anomalies.len());

    for value in prepared.merged.numeric_column(&prepared.merged_water_extent).unwrap() {
        assert_eq!(value, Some(WATER));
    }
    for value in prepared.anomalies.numeric_column(WATER_EXTENT).unwrap() {
        assert_eq!(value, Some(WATER));
    }
    for value in prepared.anomalies.numeric_column(WATER_EXTENT_TREND).unwrap() {
        let value = value.unwrap();
        assert!((value - WATER).abs() < 1e-9, "trend {value}");
    }
    for value in prepared.anomalies.numeric_column(WATER_EXTENT_ANOMALY).unwrap() {
        let value = value.unwrap();
        assert!(value.abs() < 1e-9, "anomaly {value}");
    }

    let years = prepared.anomalies.text_column("year").unwrap();
    assert_eq!(years.first(), Some(&"2020"));
    assert_eq!(years.last(), Some(&"2021"));
}

#[test]
fn persisted_tables_read_back() {
    let dir = tempfile::tempdir().unwrap();
    let config = config(dir.path());
    write_inputs(&config.data_dir);

    let prepared = pipeline::prepare(&pipeline::load(&config).unwrap()).unwrap();
    pipeline::persist(&config, &prepared).unwrap();

    let merged = Table::read_csv(&config.merged_path()).unwrap();
    assert_eq!(merged.headers(), prepared.merged.headers());
    assert_eq!(merged.len(), 8);

    let anomalies = Table::read_csv(&config.anomalies_path()).unwrap();
    assert!(anomalies.has_column(WATER_EXTENT_TREND));
    assert!(anomalies.has_column(WATER_EXTENT_ANOMALY));

    // a second run over the rewritten anomaly table suffixes the stale column
    let rerun = pipeline::prepare(&pipeline::load(&config).unwrap()).unwrap();
    assert!(rerun.anomalies.has_column("annual_water_extent_km2_x"));
    assert!(rerun.anomalies.has_column("annual_water_extent_km2_y"));
    for value in rerun.anomalies.numeric_column(WATER_EXTENT_ANOMALY).unwrap() {
        assert!(value.unwrap().abs() < 1e-9);
    }
}

#[test]
fn missing_column_fails_the_load() {
    let dir = tempfile::tempdir().unwrap();
    let config = config(dir.path());
    write_inputs(&config.data_dir);
    fs::write(
        config.seasonal_path(),
        "year,season,mean_evi,mean_precip\n2020,Summer,0.1,1\n",
    )
    .unwrap();

    let err = pipeline::load(&config).unwrap_err();
    assert!(format!("{err:#}").contains("mean_groundwater"), "{err:#}");
}

#[test]
fn missing_input_file_fails_the_load() {
    let dir = tempfile::tempdir().unwrap();
    let config = config(dir.path());
    assert!(pipeline::load(&config).is_err());
}

#[test]
fn repeated_runs_follow_the_latest_monthly_data() {
    let dir = tempfile::tempdir().unwrap();
    let config = config(dir.path());
    write_inputs(&config.data_dir);

    for water in [10.0, 20.0, 30.0, 40.0] {
        write_monthly(&config.data_dir, water);
        let prepared = pipeline::prepare(&pipeline::load(&config).unwrap()).unwrap();
        pipeline::persist(&config, &prepared).unwrap();

        let anomalies = Table::read_csv(&config.anomalies_path()).unwrap();
        let headers = anomalies.headers();
        let unique = headers.iter().collect::<HashSet<_>>();
        assert_eq!(unique.len(), headers.len(), "{headers:?}");
        for value in anomalies.numeric_column(WATER_EXTENT_TREND).unwrap() {
            assert_eq!(value, Some(water), "run with {water}");
        }
        for value in anomalies.numeric_column(WATER_EXTENT_ANOMALY).unwrap() {
            assert_eq!(value, Some(0.0), "run with {water}");
        }
    }
}

fn png_count(dir: &Path) -> usize {
    fs::read_dir(dir)
        .unwrap()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.path().extension().is_some_and(|ext| ext == "png"))
        .count()
}

#[test]
fn full_run_writes_every_chart_and_panel() {
    let dir = tempfile::tempdir().unwrap();
    let config = config(dir.path());
    write_inputs(&config.data_dir);

    eco_cmd::run(&config).unwrap();

    assert_eq!(png_count(&config.plots_dir), 9);
    assert_eq!(png_count(&config.panels_dir), 3);
    for chart in chart_catalog(WATER_EXTENT) {
        assert!(config.plot_path(&chart.spec.file_name).is_file(), "{}", chart.spec.file_name);
    }
    for panel in panel_catalog() {
        assert!(config.panel_path(panel.file_name).is_file(), "{}", panel.file_name);
    }
    assert!(config.merged_path().is_file());
}
