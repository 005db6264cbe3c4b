use eco_core::columns;

/// Pixel size of time-series and seasonal-trend charts.
pub const LINE_CHART_SIZE: (u32, u32) = (1200, 600);
/// Pixel size of correlation charts.
pub const CORRELATION_CHART_SIZE: (u32, u32) = (1000, 800);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    /// One line over calendar dates.
    TimeSeries,
    /// One marked line per category over years.
    SeasonalTrend,
    /// Scatter of two metrics with a least-squares fit line.
    Correlation,
}

/// Everything needed to draw one chart from one table.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSpec {
    pub kind: ChartKind,
    pub x: String,
    pub y: String,
    pub grouping: Option<String>,
    pub title: String,
    pub file_name: String,
    pub size: (u32, u32),
}

impl ChartSpec {
    /// `y` over the monthly `date` column.
    pub fn time_series(y: &str, title: &str, file_name: &str) -> ChartSpec {
        ChartSpec {
            kind: ChartKind::TimeSeries,
            x: columns::DATE.to_string(),
            y: y.to_string(),
            grouping: None,
            title: title.to_string(),
            file_name: file_name.to_string(),
            size: LINE_CHART_SIZE,
        }
    }

    /// `y` over `year`, one line per season.
    pub fn seasonal_trend(y: &str, title: &str, file_name: &str) -> ChartSpec {
        ChartSpec {
            kind: ChartKind::SeasonalTrend,
            x: columns::YEAR.to_string(),
            y: y.to_string(),
            grouping: Some(columns::SEASON.to_string()),
            title: title.to_string(),
            file_name: file_name.to_string(),
            size: LINE_CHART_SIZE,
        }
    }

    pub fn correlation(x: &str, y: &str, title: &str, file_name: &str) -> ChartSpec {
        ChartSpec {
            kind: ChartKind::Correlation,
            x: x.to_string(),
            y: y.to_string(),
            grouping: None,
            title: title.to_string(),
            file_name: file_name.to_string(),
            size: CORRELATION_CHART_SIZE,
        }
    }
}
