//! Builder for creating and configuring Planner instances.

use std::path::{Path, PathBuf};

use jiff::tz::TimeZone;
use log::debug;
use tokio::task;

use super::Planner;
use crate::{
    db::Database,
    error::{Result, UpkeepError},
};

/// Builder for creating and configuring Planner instances.
#[derive(Debug, Clone, Default)]
pub struct PlannerBuilder {
    database_path: Option<PathBuf>,
    time_zone: Option<String>,
}

impl PlannerBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a custom database file path.
    ///
    /// If not specified, uses XDG Base Directory specification:
    /// `$XDG_DATA_HOME/upkeep/upkeep.db` or `~/.local/share/upkeep/upkeep.db`
    pub fn with_database_path<P: AsRef<Path>>(mut self, path: Option<P>) -> Self {
        if let Some(path) = path {
            self.database_path = Some(path.as_ref().to_path_buf());
        }
        self
    }

    /// Sets the IANA time zone used to decide what "today" is.
    ///
    /// Defaults to the system time zone.
    pub fn with_time_zone(mut self, name: Option<&str>) -> Self {
        if let Some(name) = name {
            self.time_zone = Some(name.to_string());
        }
        self
    }

    /// Builds the configured planner instance.
    ///
    /// # Errors
    ///
    /// Returns `UpkeepError::Configuration` for an unknown time zone
    /// Returns `UpkeepError::FileSystem` if the database path is invalid
    /// Returns `UpkeepError::Database` if database initialization fails
    pub async fn build(self) -> Result<Planner> {
        let time_zone = match self.time_zone {
            Some(name) => TimeZone::get(&name).map_err(|e| UpkeepError::Configuration {
                message: format!("Unknown time zone '{name}': {e}"),
            })?,
            None => TimeZone::system(),
        };

        let db_path = if let Some(path) = self.database_path {
            path
        } else {
            Self::default_database_path()?
        };

        if let Some(parent) = db_path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|e| UpkeepError::FileSystem {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        debug!("Opening maintenance database at {}", db_path.display());

        let db_path_clone = db_path.clone();
        task::spawn_blocking(move || {
            let _db = Database::new(&db_path_clone)?;
            Ok::<(), UpkeepError>(())
        })
        .await
        .map_err(UpkeepError::join)??;

        Ok(Planner::new(db_path, time_zone))
    }

    /// Returns the default database path following XDG Base Directory
    /// specification.
    fn default_database_path() -> Result<PathBuf> {
        xdg::BaseDirectories::with_prefix("upkeep")
            .place_data_file("upkeep.db")
            .map_err(|e| UpkeepError::XdgDirectory(e.to_string()))
    }
}
