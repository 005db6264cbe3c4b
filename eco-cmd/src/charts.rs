use crate::catalog::{chart_catalog, panel_catalog, ChartSource};
use crate::pipeline::PreparedTables;
use anyhow::Context;
use eco_chart::{compose_panel, render_chart};
use eco_core::config::PipelineConfig;
use log::{debug, info};
use std::fs;
use std::path::PathBuf;

/// Create the plots and panels directories when absent.
pub fn create_output_dirs(config: &PipelineConfig) -> anyhow::Result<()> {
    for dir in [&config.plots_dir, &config.panels_dir] {
        fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    }
    Ok(())
}

/// Render every catalogue chart into the plots directory.
pub fn render_charts(config: &PipelineConfig, prepared: &PreparedTables) -> anyhow::Result<()> {
    for chart in chart_catalog(&prepared.merged_water_extent) {
        let table = match chart.source {
            ChartSource::Monthly => &prepared.monthly,
            ChartSource::Merged => &prepared.merged,
            ChartSource::Anomalies => &prepared.anomalies,
        };
        let path = config.plot_path(&chart.spec.file_name);
        render_chart(table, &chart.spec, &path)
            .with_context(|| format!("rendering {}", chart.spec.file_name))?;
        info!("Saved {}", path.display());
    }
    Ok(())
}

/// Compose the rendered charts into the panels directory.
pub fn compose_panels(config: &PipelineConfig) -> anyhow::Result<()> {
    for panel in panel_catalog() {
        let images = panel
            .charts
            .iter()
            .map(|file| config.plot_path(file))
            .collect::<Vec<PathBuf>>();
        let path = config.panel_path(panel.file_name);
        let plan = compose_panel(&images, panel.layout, panel.title, panel.size, &path)
            .with_context(|| format!("composing {}", panel.file_name))?;
        debug!("{}: {} hidden cells", panel.file_name, plan.hidden);
        info!("Saved {}", path.display());
    }
    Ok(())
}
