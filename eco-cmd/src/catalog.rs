//! The fixed set of charts and panels a run produces.

use eco_chart::{ChartSpec, PanelLayout};
use eco_core::columns::{
    EVI_ANOMALY, GW_ANOMALY, MEAN_EVI, MEAN_GROUNDWATER, MEAN_PRECIP, WATER_EXTENT,
    WATER_EXTENT_ANOMALY,
};

/// Which prepared table a chart is drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartSource {
    Monthly,
    Merged,
    Anomalies,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CatalogChart {
    pub source: ChartSource,
    pub spec: ChartSpec,
}

/// A composite of already rendered charts.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelSpec {
    pub file_name: &'static str,
    pub title: &'static str,
    pub layout: PanelLayout,
    pub size: (u32, u32),
    /// Chart file names in placement order.
    pub charts: Vec<&'static str>,
}

pub const MONTHLY_EVI_CHART: &str = "monthly_evi_timeseries.png";
pub const MONTHLY_PRECIP_CHART: &str = "monthly_precip_timeseries.png";
pub const MONTHLY_WATER_EXTENT_CHART: &str = "monthly_water_extent_timeseries.png";
pub const SEASONAL_EVI_CHART: &str = "seasonal_evi_lines.png";
pub const SEASONAL_PRECIP_CHART: &str = "seasonal_precip_lines.png";
pub const SEASONAL_GROUNDWATER_CHART: &str = "seasonal_groundwater_lines.png";
pub const SEASONAL_WATER_EXTENT_CHART: &str = "seasonal_water_extent_lines.png";
pub const CORR_GW_CHART: &str = "corr_monthly_evi_gw_anomaly.png";
pub const CORR_WATER_EXTENT_CHART: &str = "corr_monthly_evi_water_extent_anomaly.png";

fn chart(source: ChartSource, spec: ChartSpec) -> CatalogChart {
    CatalogChart { source, spec }
}

/// The nine charts in rendering order. `merged_water_extent` is the column
/// of the merged table holding the joined seasonal water extent.
pub fn chart_catalog(merged_water_extent: &str) -> Vec<CatalogChart> {
    use ChartSource::*;
    vec![
        chart(
            Monthly,
            ChartSpec::time_series(MEAN_EVI, "Monthly EVI Time Series", MONTHLY_EVI_CHART),
        ),
        chart(
            Monthly,
            ChartSpec::time_series(
                MEAN_PRECIP,
                "Monthly Precipitation Time Series",
                MONTHLY_PRECIP_CHART,
            ),
        ),
        chart(
            Monthly,
            ChartSpec::time_series(
                WATER_EXTENT,
                "Monthly Water Extent Area Time Series",
                MONTHLY_WATER_EXTENT_CHART,
            ),
        ),
        chart(
            Merged,
            ChartSpec::seasonal_trend(MEAN_EVI, "Seasonal EVI Trends", SEASONAL_EVI_CHART),
        ),
        chart(
            Merged,
            ChartSpec::seasonal_trend(
                MEAN_PRECIP,
                "Seasonal Precipitation Trends",
                SEASONAL_PRECIP_CHART,
            ),
        ),
        chart(
            Merged,
            ChartSpec::seasonal_trend(
                MEAN_GROUNDWATER,
                "Seasonal Groundwater Trends",
                SEASONAL_GROUNDWATER_CHART,
            ),
        ),
        chart(
            Merged,
            ChartSpec::seasonal_trend(
                merged_water_extent,
                "Annual Water Extent Trends",
                SEASONAL_WATER_EXTENT_CHART,
            ),
        ),
        chart(
            Anomalies,
            ChartSpec::correlation(
                EVI_ANOMALY,
                GW_ANOMALY,
                "EVI Anomaly vs. Groundwater Anomaly Scatter Plot",
                CORR_GW_CHART,
            ),
        ),
        chart(
            Anomalies,
            ChartSpec::correlation(
                EVI_ANOMALY,
                WATER_EXTENT_ANOMALY,
                "EVI Anomaly vs Water Extent Anomaly",
                CORR_WATER_EXTENT_CHART,
            ),
        ),
    ]
}

/// The three panels in composition order.
pub fn panel_catalog() -> Vec<PanelSpec> {
    vec![
        PanelSpec {
            file_name: "grouped_monthly_timeseries.png",
            title: "Monthly Time Series: EVI, Precipitation, and Water Extent",
            layout: PanelLayout::new(3, 1),
            size: (1000, 1800),
            charts: vec![
                MONTHLY_EVI_CHART,
                MONTHLY_PRECIP_CHART,
                MONTHLY_WATER_EXTENT_CHART,
            ],
        },
        PanelSpec {
            file_name: "grouped_seasonal_trends.png",
            title: "Seasonal Trends: EVI, Precipitation, Groundwater, and Water Extent",
            layout: PanelLayout::new(2, 2),
            size: (1800, 1200),
            charts: vec![
                SEASONAL_EVI_CHART,
                SEASONAL_PRECIP_CHART,
                SEASONAL_GROUNDWATER_CHART,
                SEASONAL_WATER_EXTENT_CHART,
            ],
        },
        PanelSpec {
            file_name: "grouped_correlation_plots.png",
            title: "Correlation Plots: EVI Anomaly vs. Groundwater and Water Extent Anomalies",
            layout: PanelLayout::new(1, 2),
            size: (2000, 800),
            charts: vec![CORR_GW_CHART, CORR_WATER_EXTENT_CHART],
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use eco_chart::ChartKind;
    use std::collections::HashSet;

    #[test]
    fn nine_charts_with_unique_files() {
        let charts = chart_catalog("annual_water_extent_km2_y");
        assert_eq!(charts.len(), 9);
        let files = charts
            .iter()
            .map(|c| c.spec.file_name.as_str())
            .collect::<HashSet<_>>();
        assert_eq!(files.len(), 9);
    }

    #[test]
    fn chart_kinds_follow_their_source_table() {
        for c in chart_catalog(WATER_EXTENT) {
            let expected = match c.source {
                ChartSource::Monthly => ChartKind::TimeSeries,
                ChartSource::Merged => ChartKind::SeasonalTrend,
                ChartSource::Anomalies => ChartKind::Correlation,
            };
            assert_eq!(c.spec.kind, expected, "{}", c.spec.file_name);
        }
    }

    #[test]
    fn water_extent_trend_uses_the_joined_column() {
        let charts = chart_catalog("annual_water_extent_km2_y");
        let water = charts
            .iter()
            .find(|c| c.spec.file_name == SEASONAL_WATER_EXTENT_CHART)
            .unwrap();
        assert_eq!(water.spec.y, "annual_water_extent_km2_y");
    }

    #[test]
    fn panels_fit_and_reference_known_charts() {
        let known = chart_catalog(WATER_EXTENT)
            .into_iter()
            .map(|c| c.spec.file_name)
            .collect::<HashSet<_>>();
        let panels = panel_catalog();
        assert_eq!(panels.len(), 3);
        for panel in &panels {
            let plan = panel.layout.plan(panel.charts.len()).unwrap();
            assert_eq!(plan.hidden, 0, "{}", panel.file_name);
            for chart in &panel.charts {
                assert!(known.contains(*chart), "{chart}");
            }
        }
        // every chart lands in exactly one panel
        let placed: usize = panels.iter().map(|p| p.charts.len()).sum();
        assert_eq!(placed, known.len());
    }
}
