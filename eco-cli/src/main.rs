//! ECO CLI - Seasonal metric tables and charts for a single study area.

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "eco-cli",
    version,
    about = "Merge seasonal metric tables and plot EVI, rainfall, groundwater and water extent"
)]
struct Cli {
    #[command(flatten)]
    run: eco_cmd::RunArgs,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();
    eco_cmd::run(&cli.run.into())
}
