//! Pipeline stages for the seasonal metrics CLI.
//!
//! A run loads the three metric tables, derives the seasonal water-extent
//! means and their anomaly trend, rewrites the seasonal CSVs, renders the
//! nine charts and composes them into three panels. Stages run strictly in
//! that order and the first error aborts the run.

use clap::Args;
use eco_core::config::{
    PipelineConfig, DEFAULT_DATA_DIR, DEFAULT_PANELS_DIR, DEFAULT_PLOTS_DIR,
};
use log::info;
use std::path::PathBuf;

pub mod catalog;
pub mod charts;
pub mod pipeline;

#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    /// Directory holding the input CSVs; the seasonal outputs are written back here
    #[arg(short = 'd', long, default_value = DEFAULT_DATA_DIR)]
    pub data_dir: PathBuf,

    /// Output directory for the individual chart PNGs
    #[arg(short = 'p', long, default_value = DEFAULT_PLOTS_DIR)]
    pub plots_dir: PathBuf,

    /// Output directory for the composite panel PNGs
    #[arg(short = 'g', long, default_value = DEFAULT_PANELS_DIR)]
    pub panels_dir: PathBuf,
}

impl From<RunArgs> for PipelineConfig {
    fn from(args: RunArgs) -> Self {
        PipelineConfig::new(args.data_dir, args.plots_dir, args.panels_dir)
    }
}

/// Run every stage against `config`.
pub fn run(config: &PipelineConfig) -> anyhow::Result<()> {
    charts::create_output_dirs(config)?;

    info!("Loading data...");
    let sources = pipeline::load(config)?;

    info!("Performing data preparation and merging...");
    let prepared = pipeline::prepare(&sources)?;
    pipeline::persist(config, &prepared)?;
    info!("Data preparation and merging complete.");

    info!("Generating individual plots...");
    charts::render_charts(config, &prepared)?;
    info!("Individual plots generated successfully.");

    info!("Generating grouped plots...");
    charts::compose_panels(config)?;
    info!(
        "All analysis and plotting complete. Check the '{}' and '{}' directories.",
        config.plots_dir.display(),
        config.panels_dir.display()
    );
    Ok(())
}
