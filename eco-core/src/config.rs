use std::path::{Path, PathBuf};

/// Directory holding the input and rewritten seasonal CSVs.
pub const DEFAULT_DATA_DIR: &str = "c";
/// Directory receiving the individual charts.
pub const DEFAULT_PLOTS_DIR: &str = "plotty";
/// Directory receiving the composite panels.
pub const DEFAULT_PANELS_DIR: &str = "grouped_plotts";

pub const MONTHLY_FILE: &str = "Monthly_AllMetrics_WithWaterExtent.csv";
pub const SEASONAL_FILE: &str = "Seasonal_AllMetrics_AllSeasons.csv";
pub const ANOMALIES_FILE: &str = "Seasonal_AllMetrics_WithAnomalies.csv";
pub const MERGED_FILE: &str = "Seasonal_AllMetrics_Merged.csv";

/// Where a pipeline run reads from and writes to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    pub data_dir: PathBuf,
    pub plots_dir: PathBuf,
    pub panels_dir: PathBuf,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        PipelineConfig {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            plots_dir: PathBuf::from(DEFAULT_PLOTS_DIR),
            panels_dir: PathBuf::from(DEFAULT_PANELS_DIR),
        }
    }
}

impl PipelineConfig {
    pub fn new(
        data_dir: impl AsRef<Path>,
        plots_dir: impl AsRef<Path>,
        panels_dir: impl AsRef<Path>,
    ) -> Self {
        PipelineConfig {
            data_dir: data_dir.as_ref().to_path_buf(),
            plots_dir: plots_dir.as_ref().to_path_buf(),
            panels_dir: panels_dir.as_ref().to_path_buf(),
        }
    }

    pub fn monthly_path(&self) -> PathBuf {
        self.data_dir.join(MONTHLY_FILE)
    }

    pub fn seasonal_path(&self) -> PathBuf {
        self.data_dir.join(SEASONAL_FILE)
    }

    /// Input and output: the anomaly table is rewritten in place.
    pub fn anomalies_path(&self) -> PathBuf {
        self.data_dir.join(ANOMALIES_FILE)
    }

    pub fn merged_path(&self) -> PathBuf {
        self.data_dir.join(MERGED_FILE)
    }

    pub fn plot_path(&self, file_name: &str) -> PathBuf {
        self.plots_dir.join(file_name)
    }

    pub fn panel_path(&self, file_name: &str) -> PathBuf {
        self.panels_dir.join(file_name)
    }
}
