//! Work order operations for the Planner.

use tokio::task;

use super::Planner;
use crate::{
    db::Database,
    error::{Result, UpkeepError},
    models::{OrderFilter, OrderStatus, WorkOrder},
    params::{CreateCorrectiveOrder, Id, ListOrders},
};

impl Planner {
    /// Lists orders matching the parameters, newest scheduled date first.
    pub async fn list_orders(&self, params: &ListOrders) -> Result<Vec<WorkOrder>> {
        let db_path = self.db_path.clone();
        let filter = OrderFilter::from(params);

        task::spawn_blocking(move || {
            let db = Database::new(&db_path)?;
            db.list_orders(&filter)
        })
        .await
        .map_err(UpkeepError::join)?
    }

    /// Retrieves an order with its asset snapshot.
    pub async fn get_order(&self, params: &Id) -> Result<Option<WorkOrder>> {
        let db_path = self.db_path.clone();
        let order_id = params.id;

        task::spawn_blocking(move || {
            let db = Database::new(&db_path)?;
            db.get_order(order_id)
        })
        .await
        .map_err(UpkeepError::join)?
    }

    /// Raises a manual corrective order.
    pub async fn create_corrective_order(
        &self,
        params: &CreateCorrectiveOrder,
    ) -> Result<WorkOrder> {
        let db_path = self.db_path.clone();
        let params = params.clone();
        let assignee = params
            .assignee
            .as_deref()
            .map(str::trim)
            .filter(|a| !a.is_empty())
            .map(String::from);

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            db.create_corrective_order(
                params.station_id,
                params.scheduled_date,
                assignee.as_deref(),
                &params.assets,
            )
        })
        .await
        .map_err(UpkeepError::join)?
    }

    /// Marks a pending order as in progress.
    pub async fn start_order(&self, params: &Id) -> Result<WorkOrder> {
        self.transition_order(params.id, OrderStatus::InProgress)
            .await
    }

    /// Closes an open order.
    pub async fn close_order(&self, params: &Id) -> Result<WorkOrder> {
        self.transition_order(params.id, OrderStatus::Closed).await
    }

    /// Cancels an open order. A cancelled scheduled order no longer blocks
    /// generation for its plan and date.
    pub async fn cancel_order(&self, params: &Id) -> Result<WorkOrder> {
        self.transition_order(params.id, OrderStatus::Cancelled)
            .await
    }

    async fn transition_order(&self, order_id: u64, next: OrderStatus) -> Result<WorkOrder> {
        let db_path = self.db_path.clone();

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            db.transition_order(order_id, next)
        })
        .await
        .map_err(UpkeepError::join)?
    }
}
