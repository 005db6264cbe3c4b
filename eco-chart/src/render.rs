use crate::error::{ChartError, Result};
use crate::palette::{series_color, FIT_COLOR};
use crate::series::{
    grouped_points, linear_fit, padded_date_range, padded_range, scatter_points,
    time_series_points,
};
use crate::spec::{ChartKind, ChartSpec};
use chrono::NaiveDate;
use eco_core::Table;
use eco_utils::labels::column_label;
use log::{debug, warn};
use plotters::prelude::*;
use std::path::Path;

const CAPTION_FONT: (&str, i32) = ("sans-serif", 28);
const LABEL_FONT: (&str, i32) = ("sans-serif", 18);
const MARKER_SIZE: i32 = 4;

/// Draw `spec` from `table` into a PNG at `path`, replacing any file there.
///
/// The backend is presented and dropped before returning, so consecutive
/// calls never hold more than one canvas.
pub fn render_chart(table: &Table, spec: &ChartSpec, path: &Path) -> Result<()> {
    debug!("Rendering {:?} chart {} -> {}", spec.kind, spec.title, path.display());
    match spec.kind {
        ChartKind::TimeSeries => draw_time_series(table, spec, path),
        ChartKind::SeasonalTrend => draw_seasonal_trend(table, spec, path),
        ChartKind::Correlation => draw_correlation(table, spec, path),
    }
}

fn draw_time_series(table: &Table, spec: &ChartSpec, path: &Path) -> Result<()> {
    let points = time_series_points(table, &spec.x, &spec.y)?;
    if points.is_empty() {
        warn!("{}: no {} values to plot", spec.file_name, spec.y);
    }
    let x_range = padded_date_range(points.iter().map(|(d, _)| *d));
    let y_range = padded_range(points.iter().map(|(_, v)| *v));

    let root = BitMapBackend::new(path, spec.size).into_drawing_area();
    root.fill(&WHITE)?;
    let mut chart = ChartBuilder::on(&root)
        .caption(&spec.title, CAPTION_FONT)
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(80)
        .build_cartesian_2d(RangedDate::from(x_range), y_range)?;
    chart
        .configure_mesh()
        .x_desc("Date")
        .y_desc(column_label(&spec.y))
        .axis_desc_style(LABEL_FONT)
        .x_labels(12)
        .x_label_formatter(&|d: &NaiveDate| d.format("%Y-%m").to_string())
        .light_line_style(BLACK.mix(0.1))
        .draw()?;
    chart.draw_series(LineSeries::new(points, series_color(0).stroke_width(2)))?;
    root.present()?;
    Ok(())
}

fn draw_seasonal_trend(table: &Table, spec: &ChartSpec, path: &Path) -> Result<()> {
    let grouping = spec
        .grouping
        .as_deref()
        .ok_or_else(|| ChartError::MissingGrouping(spec.file_name.clone()))?;
    let series = grouped_points(table, &spec.x, &spec.y, grouping)?;
    let all_points = || series.iter().flat_map(|s| s.points.iter());
    if all_points().next().is_none() {
        warn!("{}: no {} values to plot", spec.file_name, spec.y);
    }
    let x_range = {
        let r = padded_range(all_points().map(|(x, _)| *x));
        // whole years need a little room either side of the end markers
        (r.start.min(r.end - 1.0) - 0.5)..(r.end.max(r.start + 1.0) + 0.5)
    };
    let y_range = padded_range(all_points().map(|(_, y)| *y));

    let root = BitMapBackend::new(path, spec.size).into_drawing_area();
    root.fill(&WHITE)?;
    let mut chart = ChartBuilder::on(&root)
        .caption(&spec.title, CAPTION_FONT)
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(80)
        .build_cartesian_2d(x_range, y_range)?;
    chart
        .configure_mesh()
        .x_desc(column_label(&spec.x))
        .y_desc(column_label(&spec.y))
        .axis_desc_style(LABEL_FONT)
        .x_label_formatter(&|x: &f64| format!("{x:.0}"))
        .light_line_style(BLACK.mix(0.1))
        .draw()?;

    for (index, group) in series.iter().enumerate() {
        let color = series_color(index);
        chart
            .draw_series(LineSeries::new(group.points.clone(), color.stroke_width(2)))?
            .label(group.group.as_str())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2)));
        chart.draw_series(
            group
                .points
                .iter()
                .map(|&point| Circle::new(point, MARKER_SIZE, color.filled())),
        )?;
    }
    if !series.is_empty() {
        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()?;
    }
    root.present()?;
    Ok(())
}

fn draw_correlation(table: &Table, spec: &ChartSpec, path: &Path) -> Result<()> {
    let points = scatter_points(table, &spec.x, &spec.y)?;
    if points.is_empty() {
        warn!("{}: no complete ({}, {}) pairs to plot", spec.file_name, spec.x, spec.y);
    }
    let x_range = padded_range(points.iter().map(|(x, _)| *x));
    let y_range = padded_range(points.iter().map(|(_, y)| *y));

    let root = BitMapBackend::new(path, spec.size).into_drawing_area();
    root.fill(&WHITE)?;
    let mut chart = ChartBuilder::on(&root)
        .caption(&spec.title, CAPTION_FONT)
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(80)
        .build_cartesian_2d(x_range, y_range)?;
    chart
        .configure_mesh()
        .x_desc(column_label(&spec.x))
        .y_desc(column_label(&spec.y))
        .axis_desc_style(LABEL_FONT)
        .light_line_style(BLACK.mix(0.1))
        .draw()?;

    let scatter_color = series_color(0);
    chart.draw_series(
        points
            .iter()
            .map(|&point| Circle::new(point, MARKER_SIZE, scatter_color.filled())),
    )?;

    match linear_fit(&points) {
        Some(fit) => {
            let (lo, hi) = points
                .iter()
                .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), (x, _)| {
                    (lo.min(*x), hi.max(*x))
                });
            debug!(
                "{}: fit slope {:.4}, intercept {:.4}",
                spec.file_name, fit.slope, fit.intercept
            );
            chart.draw_series(LineSeries::new(
                vec![(lo, fit.at(lo)), (hi, fit.at(hi))],
                FIT_COLOR.stroke_width(2),
            ))?;
        }
        None => warn!("{}: not enough spread in {} for a fit line", spec.file_name, spec.x),
    }
    root.present()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(csv: &str) -> Table {
        Table::from_reader("chart.csv", csv.as_bytes()).unwrap()
    }

    fn render_to_temp(table: &Table, spec: &ChartSpec) -> (tempfile::TempDir, std::path::PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(&spec.file_name);
        render_chart(table, spec, &path).unwrap();
        (dir, path)
    }

    #[test]
    fn time_series_png_has_the_chart_size() {
        let table = table("date,mean_evi\n2020-01-01,0.3\n2020-03-01,0.5\n2020-02-01,\n2020-04-01,0.4\n");
        let spec = ChartSpec::time_series("mean_evi", "Monthly EVI", "evi.png");
        let (_dir, path) = render_to_temp(&table, &spec);
        assert_eq!(image::image_dimensions(&path).unwrap(), spec.size);
    }

    #[test]
    fn seasonal_trend_png_has_the_chart_size() {
        let table = table(
            "year,season,mean_precip\n2020,Summer,1\n2020,Winter,3\n2021,Summer,2\n2021,Winter,\n2022,Summer,4\n",
        );
        let spec = ChartSpec::seasonal_trend("mean_precip", "Seasonal Precipitation", "precip.png");
        let (_dir, path) = render_to_temp(&table, &spec);
        assert_eq!(image::image_dimensions(&path).unwrap(), spec.size);
    }

    #[test]
    fn correlation_png_has_the_chart_size() {
        let table = table("evi_anomaly,gw_anomaly\n-0.1,2\n0.0,0.5\n0.2,-1\n,3\n");
        let spec = ChartSpec::correlation("evi_anomaly", "gw_anomaly", "EVI vs GW", "corr.png");
        let (_dir, path) = render_to_temp(&table, &spec);
        assert_eq!(image::image_dimensions(&path).unwrap(), spec.size);
    }

    #[test]
    fn infinite_cells_are_left_out_of_the_axes() {
        let table = table("a,b\n1,2\ninf,3\n2,4\n-inf,1\n");
        let spec = ChartSpec::correlation("a", "b", "With infinities", "inf.png");
        let (_dir, path) = render_to_temp(&table, &spec);
        assert_eq!(image::image_dimensions(&path).unwrap(), spec.size);
    }

    #[test]
    fn empty_chart_is_still_written() {
        let table = table("year,season,mean_groundwater\n");
        let spec = ChartSpec::seasonal_trend("mean_groundwater", "Nothing yet", "empty.png");
        let (_dir, path) = render_to_temp(&table, &spec);
        assert!(path.is_file());
    }

    #[test]
    fn missing_column_is_reported_before_drawing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.png");
        let table = table("date,mean_evi\n2020-01-01,0.3\n");
        let spec = ChartSpec::time_series("mean_precip", "Precipitation", "missing.png");
        let err = render_chart(&table, &spec, &path).unwrap_err();
        assert!(matches!(err, ChartError::Table(_)));
        assert!(!path.exists());
    }

    #[test]
    fn grouped_chart_without_grouping_fails() {
        let dir = tempfile::tempdir().unwrap();
        let mut spec = ChartSpec::seasonal_trend("mean_evi", "Seasonal EVI", "seasonal.png");
        spec.grouping = None;
        let table = table("year,season,mean_evi\n2020,Summer,1\n");
        let err = render_chart(&table, &spec, &dir.path().join("seasonal.png")).unwrap_err();
        assert!(matches!(err, ChartError::MissingGrouping(_)));
    }
}
