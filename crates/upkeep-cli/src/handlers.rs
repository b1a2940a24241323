//! Command handlers that call the planner and render the results.

use anyhow::{Context, Result};
use log::debug;
use upkeep_core::{
    Planner, UpkeepError,
    display::{
        ActivityLog, Assets, CreateResult, DeleteResult, Occurrences, OperationStatus, Orders,
        Plans, Stations, UpdateResult,
    },
    params::{GenerateOrders, Id, ListAssets, ListOrders, ListPlans},
};

use crate::{
    cli::{AssetCommands, GenerateArgs, OrderCommands, PlanCommands, StationCommands},
    renderer::TerminalRenderer,
};

/// Dispatches parsed commands to the planner.
pub struct Cli {
    planner: Planner,
    renderer: TerminalRenderer,
}

impl Cli {
    pub fn new(planner: Planner, renderer: TerminalRenderer) -> Self {
        Self { planner, renderer }
    }

    pub async fn handle_station_command(&self, command: StationCommands) -> Result<()> {
        match command {
            StationCommands::Create(args) => {
                let station = self.planner.create_station(&args.into()).await?;
                self.renderer
                    .render(&CreateResult::new(station).to_string())
            }
            StationCommands::List => {
                let stations = self.planner.list_stations().await?;
                self.renderer.render(&Stations(stations).to_string())
            }
        }
    }

    pub async fn handle_asset_command(&self, command: AssetCommands) -> Result<()> {
        match command {
            AssetCommands::Create(args) => {
                let asset = self.planner.create_asset(&args.into()).await?;
                self.renderer.render(&CreateResult::new(asset).to_string())
            }
            AssetCommands::List(args) => {
                let params: ListAssets = args.into();
                let assets = self.planner.list_assets(&params).await?;
                self.renderer.render(&Assets(assets).to_string())
            }
        }
    }

    pub async fn handle_plan_command(&self, command: PlanCommands) -> Result<()> {
        match command {
            PlanCommands::Create(args) => {
                let plan = self.planner.create_plan(&args.into()).await?;
                self.renderer.render(&CreateResult::new(plan).to_string())
            }
            PlanCommands::List(args) => self.list_plans(&args.into()).await,
            PlanCommands::Show(args) => {
                let id: Id = args.into();
                let plan = self
                    .planner
                    .get_plan(&id)
                    .await?
                    .ok_or(UpkeepError::PlanNotFound { id: id.id })?;
                self.renderer.render(&plan.to_string())
            }
            PlanCommands::Update(args) => {
                let plan = self.planner.update_plan(&args.into()).await?;
                self.renderer.render(&UpdateResult::new(plan).to_string())
            }
            PlanCommands::Delete(args) => {
                let id = args.id;
                match self.planner.delete_plan(&args.into()).await? {
                    Some(plan) => self.renderer.render(&DeleteResult::new(plan).to_string()),
                    None => self.renderer.render(
                        &OperationStatus::failure(format!("Plan with ID {id} not found"))
                            .to_string(),
                    ),
                }
            }
            PlanCommands::AddAsset(args) => {
                let asset_id = args.asset_id;
                let plan = self.planner.add_plan_asset(&args.into()).await?;
                self.renderer.render(
                    &UpdateResult::with_changes(plan, vec![format!("Attached asset {asset_id}")])
                        .to_string(),
                )
            }
            PlanCommands::RemoveAsset(args) => {
                let asset_id = args.asset_id;
                let plan = self.planner.remove_plan_asset(&args.into()).await?;
                self.renderer.render(
                    &UpdateResult::with_changes(plan, vec![format!("Detached asset {asset_id}")])
                        .to_string(),
                )
            }
            PlanCommands::Upcoming(args) => {
                let (plan, dates) = self.planner.upcoming_orders(&args.into()).await?;
                self.renderer.render(
                    &Occurrences {
                        plan: &plan,
                        dates: &dates,
                    }
                    .to_string(),
                )
            }
            PlanCommands::Activity(args) => {
                let activity = self.planner.plan_activity(&args.into()).await?;
                self.renderer.render(&ActivityLog(activity).to_string())
            }
        }
    }

    pub async fn handle_order_command(&self, command: OrderCommands) -> Result<()> {
        match command {
            OrderCommands::List(args) => {
                let params: ListOrders = args.into();
                let orders = self.planner.list_orders(&params).await?;
                self.renderer.render(&Orders(orders).to_string())
            }
            OrderCommands::Show(args) => {
                let id: Id = args.into();
                let order = self
                    .planner
                    .get_order(&id)
                    .await?
                    .ok_or(UpkeepError::OrderNotFound { id: id.id })?;
                self.renderer.render(&order.to_string())
            }
            OrderCommands::Create(args) => {
                let order = self.planner.create_corrective_order(&args.into()).await?;
                self.renderer.render(&CreateResult::new(order).to_string())
            }
            OrderCommands::Start(args) => {
                let order = self.planner.start_order(&args.into()).await?;
                self.renderer.render(&UpdateResult::new(order).to_string())
            }
            OrderCommands::Close(args) => {
                let order = self.planner.close_order(&args.into()).await?;
                self.renderer.render(&UpdateResult::new(order).to_string())
            }
            OrderCommands::Cancel(args) => {
                let order = self.planner.cancel_order(&args.into()).await?;
                self.renderer.render(&UpdateResult::new(order).to_string())
            }
        }
    }

    /// Runs order generation. Per-plan failures are part of the summary and
    /// do not change the exit status.
    pub async fn handle_generate(&self, args: &GenerateArgs) -> Result<()> {
        let params: GenerateOrders = args.into();
        let summary = self
            .planner
            .generate_orders(&params)
            .await
            .context("Order generation failed")?;
        debug!(
            "Generation for {} finished with {} errors",
            summary.target_date, summary.errors
        );

        if args.json {
            println!("{}", serde_json::to_string_pretty(&summary)?);
            Ok(())
        } else {
            self.renderer.render(&summary.to_string())
        }
    }

    pub async fn list_plans(&self, params: &ListPlans) -> Result<()> {
        let plans = self.planner.list_plans(params).await?;
        self.renderer.render(&Plans(plans).to_string())
    }
}
