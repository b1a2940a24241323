//! Station and asset operations for the Planner.

use tokio::task;

use super::Planner;
use crate::{
    db::Database,
    error::{Result, UpkeepError},
    models::{Asset, Station},
    params::{CreateAsset, CreateStation, Id, ListAssets},
};

impl Planner {
    /// Registers a new station.
    pub async fn create_station(&self, params: &CreateStation) -> Result<Station> {
        let db_path = self.db_path.clone();
        let name = params.name.clone();

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            db.create_station(&name)
        })
        .await
        .map_err(UpkeepError::join)?
    }

    /// Lists all stations by name.
    pub async fn list_stations(&self) -> Result<Vec<Station>> {
        let db_path = self.db_path.clone();

        task::spawn_blocking(move || {
            let db = Database::new(&db_path)?;
            db.list_stations()
        })
        .await
        .map_err(UpkeepError::join)?
    }

    /// Registers an asset at a station.
    pub async fn create_asset(&self, params: &CreateAsset) -> Result<Asset> {
        let db_path = self.db_path.clone();
        let params = params.clone();

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            db.create_asset(params.station_id, &params.code, &params.name)
        })
        .await
        .map_err(UpkeepError::join)?
    }

    /// Retrieves an asset by its ID.
    pub async fn get_asset(&self, params: &Id) -> Result<Option<Asset>> {
        let db_path = self.db_path.clone();
        let asset_id = params.id;

        task::spawn_blocking(move || {
            let db = Database::new(&db_path)?;
            db.get_asset(asset_id)
        })
        .await
        .map_err(UpkeepError::join)?
    }

    /// Lists assets, optionally for one station.
    pub async fn list_assets(&self, params: &ListAssets) -> Result<Vec<Asset>> {
        let db_path = self.db_path.clone();
        let station_id = params.station_id;

        task::spawn_blocking(move || {
            let db = Database::new(&db_path)?;
            db.list_assets(station_id)
        })
        .await
        .map_err(UpkeepError::join)?
    }
}
