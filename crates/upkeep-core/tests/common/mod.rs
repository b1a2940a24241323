#![allow(dead_code)]

use jiff::civil::Date;
use tempfile::{NamedTempFile, TempDir};
use upkeep_core::{
    Database, Frequency, MaintenancePlan, Planner, PlannerBuilder, TriggerType, Weekday,
    validation::validate_schedule,
};

/// Helper function to create a test planner
pub async fn create_test_planner() -> (TempDir, Planner) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("test.db");
    let planner = PlannerBuilder::new()
        .with_database_path(Some(&db_path))
        .with_time_zone(Some("America/Santiago"))
        .build()
        .await
        .expect("Failed to create planner");
    (temp_dir, planner)
}

/// Helper function to create a temporary database for testing
pub fn create_test_db() -> (NamedTempFile, Database) {
    let temp_file = NamedTempFile::new().expect("Failed to create temporary file");
    let db = Database::new(temp_file.path()).expect("Failed to create test database");
    (temp_file, db)
}

/// Creates a station with the given asset codes and returns their IDs.
pub fn seed_station(db: &mut Database, name: &str, codes: &[&str]) -> (u64, Vec<u64>) {
    let station = db.create_station(name).expect("Failed to create station");
    let assets = codes
        .iter()
        .map(|code| {
            db.create_asset(station.id, code, &format!("Asset {code}"))
                .expect("Failed to create asset")
                .id
        })
        .collect();
    (station.id, assets)
}

/// Creates a time-triggered plan through the regular validation path.
pub fn time_plan(
    db: &mut Database,
    station_id: u64,
    name: &str,
    start_date: Date,
    frequency: Frequency,
    interval: i64,
    weekday: Option<Weekday>,
) -> MaintenancePlan {
    let schedule = validate_schedule(
        TriggerType::Time,
        Some(frequency),
        Some(interval),
        weekday,
        None,
    )
    .expect("Schedule should be valid");
    db.create_plan(station_id, name, start_date, true, &schedule)
        .expect("Failed to create plan")
}
