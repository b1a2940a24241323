//! Upkeep CLI Application
//!
//! Command-line interface for station maintenance plans and work orders,
//! and the entry point an external scheduler calls once a day.

mod args;
mod cli;
mod handlers;
mod renderer;

use Commands::*;
use anyhow::{Context, Result};
use args::{Args, Commands};
use clap::Parser;
use handlers::Cli;
use log::info;
use renderer::TerminalRenderer;
use upkeep_core::{PlannerBuilder, params::ListPlans};

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let Args {
        database_file,
        time_zone,
        no_color,
        command,
    } = Args::parse();

    let planner = PlannerBuilder::new()
        .with_database_path(database_file)
        .with_time_zone(time_zone.as_deref())
        .build()
        .await
        .context("Failed to initialize planner")?;

    let cli = Cli::new(planner, TerminalRenderer::new(!no_color));

    info!("Upkeep started");

    match command {
        Some(Station { command }) => cli.handle_station_command(command).await,
        Some(Asset { command }) => cli.handle_asset_command(command).await,
        Some(Plan { command }) => cli.handle_plan_command(command).await,
        Some(Order { command }) => cli.handle_order_command(command).await,
        Some(Generate(args)) => cli.handle_generate(&args).await,
        None => cli.list_plans(&ListPlans::default()).await,
    }
}
