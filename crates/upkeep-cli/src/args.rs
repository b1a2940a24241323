use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::cli::{AssetCommands, GenerateArgs, OrderCommands, PlanCommands, StationCommands};

/// Preventive maintenance for fire stations
///
/// Register stations and their equipment, describe recurring maintenance as
/// plans, and turn the plans due each day into work orders. Schedule
/// `upkeep generate` once a day (e.g. from cron) to keep orders flowing.
#[derive(Parser)]
#[command(version, about, name = "upkeep")]
pub struct Args {
    /// Path to the SQLite database file. Defaults to
    /// $XDG_DATA_HOME/upkeep/upkeep.db
    #[arg(long, global = true)]
    pub database_file: Option<PathBuf>,

    /// IANA time zone that decides what "today" is (e.g. America/Santiago).
    /// Defaults to the system time zone
    #[arg(long, global = true)]
    pub time_zone: Option<String>,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands for the upkeep CLI
#[derive(Subcommand)]
pub enum Commands {
    /// Manage stations
    Station {
        #[command(subcommand)]
        command: StationCommands,
    },
    /// Manage station assets
    #[command(alias = "a")]
    Asset {
        #[command(subcommand)]
        command: AssetCommands,
    },
    /// Manage maintenance plans
    #[command(alias = "p")]
    Plan {
        #[command(subcommand)]
        command: PlanCommands,
    },
    /// Manage work orders
    #[command(alias = "o")]
    Order {
        #[command(subcommand)]
        command: OrderCommands,
    },
    /// Generate the scheduled work orders due on a date
    #[command(alias = "g")]
    Generate(GenerateArgs),
}
