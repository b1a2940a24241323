//! Command-line argument definitions using clap
//!
//! Every command has a clap wrapper struct converted into the matching core
//! parameter type, so the core stays free of clap derives:
//!
//! ```text
//! User Input → CLI Args (clap) → Core Params → Planner
//! ```

use clap::{Args, Subcommand, ValueEnum};
use jiff::civil::Date;
use upkeep_core::{Frequency, OrderStatus, OrderType, TriggerType, Weekday, params::*};

// ============================================================================
// Stations and assets
// ============================================================================

/// Register a new station
#[derive(Args)]
pub struct CreateStationArgs {
    /// Unique station name
    pub name: String,
}

impl From<CreateStationArgs> for CreateStation {
    fn from(val: CreateStationArgs) -> Self {
        CreateStation { name: val.name }
    }
}

#[derive(Subcommand)]
pub enum StationCommands {
    /// Register a new station
    #[command(alias = "c")]
    Create(CreateStationArgs),
    /// List all stations
    #[command(aliases = ["l", "ls"])]
    List,
}

/// Register an asset at a station
#[derive(Args)]
pub struct CreateAssetArgs {
    /// Inventory code, unique within the station
    pub code: String,
    /// Descriptive name of the equipment
    pub name: String,
    /// Station that owns the asset
    #[arg(long)]
    pub station: u64,
}

impl From<CreateAssetArgs> for CreateAsset {
    fn from(val: CreateAssetArgs) -> Self {
        CreateAsset {
            station_id: val.station,
            code: val.code,
            name: val.name,
        }
    }
}

/// List assets
#[derive(Args)]
pub struct ListAssetsArgs {
    /// Only assets of this station
    #[arg(long)]
    pub station: Option<u64>,
}

impl From<ListAssetsArgs> for ListAssets {
    fn from(val: ListAssetsArgs) -> Self {
        ListAssets {
            station_id: val.station,
        }
    }
}

#[derive(Subcommand)]
pub enum AssetCommands {
    /// Register an asset at a station
    #[command(alias = "c")]
    Create(CreateAssetArgs),
    /// List assets
    #[command(aliases = ["l", "ls"])]
    List(ListAssetsArgs),
}

// ============================================================================
// Maintenance plans
// ============================================================================

/// What drives a plan
#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum TriggerArg {
    /// Calendar schedule
    Time,
    /// Accumulated usage hours
    Usage,
}

impl From<TriggerArg> for TriggerType {
    fn from(val: TriggerArg) -> Self {
        match val {
            TriggerArg::Time => TriggerType::Time,
            TriggerArg::Usage => TriggerType::Usage,
        }
    }
}

/// Calendar unit of a time-triggered plan
#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum FrequencyArg {
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl From<FrequencyArg> for Frequency {
    fn from(val: FrequencyArg) -> Self {
        match val {
            FrequencyArg::Daily => Frequency::Daily,
            FrequencyArg::Weekly => Frequency::Weekly,
            FrequencyArg::Monthly => Frequency::Monthly,
            FrequencyArg::Yearly => Frequency::Yearly,
        }
    }
}

/// Create a maintenance plan
///
/// Time-triggered plans need --frequency and fire every --interval units from
/// --start. Weekly plans also need --weekday. Usage-triggered plans need
/// --usage-hours and are never picked up by `generate`.
#[derive(Args)]
pub struct CreatePlanArgs {
    /// Name of the plan
    pub name: String,
    /// Station that owns the plan
    #[arg(long)]
    pub station: u64,
    /// First date the plan can fire (YYYY-MM-DD)
    #[arg(long)]
    pub start: Date,
    #[arg(long, value_enum, default_value_t = TriggerArg::Time)]
    pub trigger: TriggerArg,
    #[arg(short, long, value_enum)]
    pub frequency: Option<FrequencyArg>,
    /// Fire every N units of the frequency
    #[arg(short, long, default_value_t = 1)]
    pub interval: i64,
    /// Day of week for weekly plans (monday..sunday, mon..sun or 0..6)
    #[arg(short, long)]
    pub weekday: Option<Weekday>,
    /// Usage hours between services for usage-triggered plans
    #[arg(long)]
    pub usage_hours: Option<f64>,
    /// Create the plan switched off
    #[arg(long)]
    pub inactive: bool,
}

impl From<CreatePlanArgs> for CreatePlan {
    fn from(val: CreatePlanArgs) -> Self {
        CreatePlan {
            station_id: val.station,
            name: val.name,
            start_date: val.start,
            trigger_type: val.trigger.into(),
            frequency: val.frequency.map(Into::into),
            interval: Some(val.interval),
            weekday: val.weekday,
            usage_hours_trigger: val.usage_hours,
            active: !val.inactive,
        }
    }
}

/// List maintenance plans
#[derive(Args)]
pub struct ListPlansArgs {
    /// Only plans of this station
    #[arg(long)]
    pub station: Option<u64>,
    /// Include inactive plans
    #[arg(long)]
    pub all: bool,
    #[arg(long, value_enum)]
    pub trigger: Option<TriggerArg>,
    /// Only plans whose name contains this text
    #[arg(short, long)]
    pub search: Option<String>,
}

impl From<ListPlansArgs> for ListPlans {
    fn from(val: ListPlansArgs) -> Self {
        ListPlans {
            station_id: val.station,
            include_inactive: val.all,
            trigger_type: val.trigger.map(Into::into),
            search: val.search,
        }
    }
}

/// Identify a plan
#[derive(Args)]
pub struct PlanIdArgs {
    /// ID of the plan
    pub id: u64,
}

impl From<PlanIdArgs> for Id {
    fn from(val: PlanIdArgs) -> Self {
        Id { id: val.id }
    }
}

/// Edit a maintenance plan; omitted options keep their value
#[derive(Args)]
pub struct UpdatePlanArgs {
    /// ID of the plan to edit
    pub id: u64,
    #[arg(long)]
    pub name: Option<String>,
    /// New start date (YYYY-MM-DD)
    #[arg(long)]
    pub start: Option<Date>,
    /// Switch the plan on or off
    #[arg(long)]
    pub active: Option<bool>,
    #[arg(long, value_enum)]
    pub trigger: Option<TriggerArg>,
    #[arg(short, long, value_enum)]
    pub frequency: Option<FrequencyArg>,
    #[arg(short, long)]
    pub interval: Option<i64>,
    #[arg(short, long, conflicts_with = "clear_weekday")]
    pub weekday: Option<Weekday>,
    /// Remove the pinned weekday
    #[arg(long)]
    pub clear_weekday: bool,
    #[arg(long)]
    pub usage_hours: Option<f64>,
}

impl From<UpdatePlanArgs> for UpdatePlan {
    fn from(val: UpdatePlanArgs) -> Self {
        UpdatePlan {
            id: val.id,
            name: val.name,
            start_date: val.start,
            active: val.active,
            trigger_type: val.trigger.map(Into::into),
            frequency: val.frequency.map(Into::into),
            interval: val.interval,
            weekday: val.weekday,
            clear_weekday: val.clear_weekday,
            usage_hours_trigger: val.usage_hours,
        }
    }
}

/// Delete a plan permanently; its work orders are kept
#[derive(Args)]
pub struct DeletePlanArgs {
    /// ID of the plan to delete
    pub id: u64,
    /// Confirm the deletion (required to prevent accidental deletion)
    #[arg(long)]
    pub confirm: bool,
}

impl From<DeletePlanArgs> for DeletePlan {
    fn from(val: DeletePlanArgs) -> Self {
        DeletePlan {
            id: val.id,
            confirmed: val.confirm,
        }
    }
}

/// Attach an asset to or detach it from a plan
#[derive(Args)]
pub struct PlanAssetArgs {
    /// ID of the plan
    pub plan_id: u64,
    /// ID of the asset
    pub asset_id: u64,
    /// Who is making the change, for the activity log
    #[arg(long)]
    pub actor: Option<String>,
}

impl From<PlanAssetArgs> for PlanAsset {
    fn from(val: PlanAssetArgs) -> Self {
        PlanAsset {
            plan_id: val.plan_id,
            asset_id: val.asset_id,
            actor: val.actor,
        }
    }
}

/// Preview the next dates a plan will generate orders for
#[derive(Args)]
pub struct UpcomingArgs {
    /// ID of the plan
    pub id: u64,
    /// First date to consider (YYYY-MM-DD); defaults to today
    #[arg(long)]
    pub from: Option<Date>,
    /// Number of dates to show
    #[arg(short = 'n', long, default_value_t = 5)]
    pub limit: usize,
}

impl From<UpcomingArgs> for UpcomingOrders {
    fn from(val: UpcomingArgs) -> Self {
        UpcomingOrders {
            plan_id: val.id,
            from: val.from,
            limit: val.limit,
        }
    }
}

#[derive(Subcommand)]
pub enum PlanCommands {
    /// Create a maintenance plan
    #[command(alias = "c")]
    Create(CreatePlanArgs),
    /// List maintenance plans
    #[command(aliases = ["l", "ls"])]
    List(ListPlansArgs),
    /// Show details of a plan
    #[command(alias = "s")]
    Show(PlanIdArgs),
    /// Edit a plan
    #[command(alias = "u")]
    Update(UpdatePlanArgs),
    /// Delete a plan permanently
    Delete(DeletePlanArgs),
    /// Attach an asset to a plan
    AddAsset(PlanAssetArgs),
    /// Detach an asset from a plan
    RemoveAsset(PlanAssetArgs),
    /// Preview upcoming occurrences
    Upcoming(UpcomingArgs),
    /// Show the plan's asset-list change history
    Activity(PlanIdArgs),
}

// ============================================================================
// Work orders
// ============================================================================

/// Order status filter
#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum StatusArg {
    Pending,
    InProgress,
    Closed,
    Cancelled,
}

impl From<StatusArg> for OrderStatus {
    fn from(val: StatusArg) -> Self {
        match val {
            StatusArg::Pending => OrderStatus::Pending,
            StatusArg::InProgress => OrderStatus::InProgress,
            StatusArg::Closed => OrderStatus::Closed,
            StatusArg::Cancelled => OrderStatus::Cancelled,
        }
    }
}

/// Order type filter
#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum OrderTypeArg {
    Scheduled,
    Corrective,
}

impl From<OrderTypeArg> for OrderType {
    fn from(val: OrderTypeArg) -> Self {
        match val {
            OrderTypeArg::Scheduled => OrderType::Scheduled,
            OrderTypeArg::Corrective => OrderType::Corrective,
        }
    }
}

/// List work orders, most recent date first
#[derive(Args)]
pub struct ListOrdersArgs {
    #[arg(long)]
    pub station: Option<u64>,
    #[arg(long)]
    pub plan: Option<u64>,
    #[arg(long, value_enum)]
    pub status: Option<StatusArg>,
    #[arg(long = "type", value_enum)]
    pub order_type: Option<OrderTypeArg>,
    /// Earliest scheduled date (YYYY-MM-DD)
    #[arg(long)]
    pub from: Option<Date>,
    /// Latest scheduled date (YYYY-MM-DD)
    #[arg(long)]
    pub to: Option<Date>,
}

impl From<ListOrdersArgs> for ListOrders {
    fn from(val: ListOrdersArgs) -> Self {
        ListOrders {
            station_id: val.station,
            plan_id: val.plan,
            status: val.status.map(Into::into),
            order_type: val.order_type.map(Into::into),
            from: val.from,
            to: val.to,
        }
    }
}

/// Identify a work order
#[derive(Args)]
pub struct OrderIdArgs {
    /// ID of the work order
    pub id: u64,
}

impl From<OrderIdArgs> for Id {
    fn from(val: OrderIdArgs) -> Self {
        Id { id: val.id }
    }
}

/// Raise a corrective work order
#[derive(Args)]
pub struct CreateOrderArgs {
    #[arg(long)]
    pub station: u64,
    /// Scheduled date (YYYY-MM-DD)
    #[arg(long)]
    pub date: Date,
    #[arg(long)]
    pub assignee: Option<String>,
    /// Affected asset; repeat for several
    #[arg(long = "asset")]
    pub assets: Vec<u64>,
}

impl From<CreateOrderArgs> for CreateCorrectiveOrder {
    fn from(val: CreateOrderArgs) -> Self {
        CreateCorrectiveOrder {
            station_id: val.station,
            scheduled_date: val.date,
            assignee: val.assignee,
            assets: val.assets,
        }
    }
}

#[derive(Subcommand)]
pub enum OrderCommands {
    /// List work orders
    #[command(aliases = ["l", "ls"])]
    List(ListOrdersArgs),
    /// Show details of a work order
    #[command(alias = "s")]
    Show(OrderIdArgs),
    /// Raise a corrective work order
    #[command(alias = "c")]
    Create(CreateOrderArgs),
    /// Mark a pending order as in progress
    Start(OrderIdArgs),
    /// Close an open order
    Close(OrderIdArgs),
    /// Cancel an open order
    Cancel(OrderIdArgs),
}

// ============================================================================
// Daily generation
// ============================================================================

/// Generate the scheduled work orders due on a date
///
/// Safe to run more than once for the same date: plans that already have an
/// order are reported as skipped.
#[derive(Args)]
pub struct GenerateArgs {
    /// Target date (YYYY-MM-DD); defaults to today in --time-zone
    #[arg(long)]
    pub date: Option<Date>,
    /// Print the run summary as JSON
    #[arg(long)]
    pub json: bool,
}

impl From<&GenerateArgs> for GenerateOrders {
    fn from(val: &GenerateArgs) -> Self {
        GenerateOrders { date: val.date }
    }
}
