mod common;

use common::{create_test_db, seed_station, time_plan};
use jiff::{Zoned, civil::date};
use upkeep_core::{
    Frequency, OrderFilter, OrderStatus, OrderType, PlanFilter, TriggerType, UpkeepError,
    generate_for_date, models::activity::PLAN_TARGET, validation::validate_schedule,
};

#[test]
fn test_database_initialization() {
    let (temp_file, db) = create_test_db();

    assert!(temp_file.path().exists());
    assert!(db.list_stations().expect("Failed to list stations").is_empty());
}

#[test]
fn test_reopening_database_keeps_data() {
    let (temp_file, mut db) = create_test_db();
    db.create_station("Station 1").expect("Failed to create station");
    drop(db);

    let db = upkeep_core::Database::new(temp_file.path()).expect("Failed to reopen database");
    assert_eq!(db.list_stations().expect("Failed to list stations").len(), 1);
}

#[test]
fn test_station_and_asset_constraints() {
    let (_temp_file, mut db) = create_test_db();
    let (station_id, assets) = seed_station(&mut db, "Station 1", &["B-1"]);

    assert!(matches!(
        db.create_station("Station 1"),
        Err(UpkeepError::Database { .. })
    ));
    assert!(matches!(
        db.create_station("   "),
        Err(UpkeepError::InvalidInput { .. })
    ));
    assert!(matches!(
        db.create_asset(station_id, "B-1", "Duplicate pump"),
        Err(UpkeepError::Database { .. })
    ));
    assert!(matches!(
        db.create_asset(999, "X-1", "Orphan"),
        Err(UpkeepError::StationNotFound { id: 999 })
    ));

    // Codes are only unique within a station
    let (other_station, _) = seed_station(&mut db, "Station 2", &["B-1"]);
    let all = db.list_assets(None).expect("Failed to list assets");
    assert_eq!(all.len(), 2);
    let own = db
        .list_assets(Some(other_station))
        .expect("Failed to list assets");
    assert_eq!(own.len(), 1);
    assert_ne!(own[0].id, assets[0]);
}

#[test]
fn test_create_and_get_plan_with_assets() {
    let (_temp_file, mut db) = create_test_db();
    let (station_id, assets) = seed_station(&mut db, "Station 1", &["B-1", "M-7"]);

    let plan = time_plan(
        &mut db,
        station_id,
        "Pump check",
        date(2024, 1, 1),
        Frequency::Daily,
        3,
        None,
    );
    assert!(plan.id > 0);
    assert!(plan.assets.is_empty());

    assert!(db.add_plan_asset(plan.id, assets[1]).expect("Failed to add"));
    assert!(db.add_plan_asset(plan.id, assets[0]).expect("Failed to add"));
    assert!(!db.add_plan_asset(plan.id, assets[0]).expect("Failed to add"));

    let stored = db
        .get_plan(plan.id)
        .expect("Failed to get plan")
        .expect("Plan should exist");
    assert_eq!(stored.name, "Pump check");
    assert_eq!(stored.interval, 3);
    assert_eq!(stored.frequency, Some(Frequency::Daily));
    assert_eq!(stored.assets, vec![assets[0], assets[1]]);

    assert!(db.get_plan(999).expect("Query should succeed").is_none());
}

#[test]
fn test_list_plans_candidate_filter() {
    let (_temp_file, mut db) = create_test_db();
    let (station_id, _) = seed_station(&mut db, "Station 1", &[]);

    let started = time_plan(
        &mut db,
        station_id,
        "Started",
        date(2024, 1, 1),
        Frequency::Daily,
        1,
        None,
    );
    time_plan(
        &mut db,
        station_id,
        "Future",
        date(2024, 6, 1),
        Frequency::Daily,
        1,
        None,
    );
    let usage = validate_schedule(TriggerType::Usage, None, None, None, Some(100.0))
        .expect("Schedule should be valid");
    db.create_plan(station_id, "Usage", date(2024, 1, 1), true, &usage)
        .expect("Failed to create plan");
    let mut paused = time_plan(
        &mut db,
        station_id,
        "Paused",
        date(2024, 1, 1),
        Frequency::Daily,
        1,
        None,
    );
    paused.active = false;
    db.update_plan(&paused).expect("Failed to update plan");

    let candidates = db
        .list_plans(&PlanFilter::candidates_for(date(2024, 3, 1)))
        .expect("Failed to list plans");
    assert_eq!(candidates.len(), 1);
    assert_eq!(candidates[0].id, started.id);

    let by_name = db
        .list_plans(&PlanFilter {
            name_contains: Some("us".to_string()),
            ..Default::default()
        })
        .expect("Failed to list plans");
    // LIKE matches "Usage" and "Paused" regardless of case
    assert_eq!(by_name.len(), 2);
}

#[test]
fn test_materialized_order_keeps_its_snapshot() {
    let (_temp_file, mut db) = create_test_db();
    let (station_id, assets) = seed_station(&mut db, "Station 1", &["B-1", "M-7", "E-3"]);

    let plan = time_plan(
        &mut db,
        station_id,
        "Chainsaw service",
        date(2024, 1, 1),
        Frequency::Weekly,
        1,
        Some(upkeep_core::Weekday::Monday),
    );
    db.add_plan_asset(plan.id, assets[0]).expect("Failed to add");
    db.add_plan_asset(plan.id, assets[1]).expect("Failed to add");
    let plan = db.get_plan(plan.id).unwrap().unwrap();

    let order = db
        .materialize_scheduled_order(&plan, date(2024, 1, 8))
        .expect("Failed to materialize");
    assert_eq!(order.origin_plan_id, Some(plan.id));
    assert_eq!(order.station_id, station_id);
    assert_eq!(order.order_type, OrderType::Scheduled);
    assert_eq!(order.status, OrderStatus::Pending);
    assert_eq!(order.affected_assets, vec![assets[0], assets[1]]);

    // Editing the plan afterwards leaves the order untouched
    db.remove_plan_asset(plan.id, assets[0]).expect("Failed to remove");
    db.add_plan_asset(plan.id, assets[2]).expect("Failed to add");

    let stored = db
        .get_order(order.id)
        .expect("Failed to get order")
        .expect("Order should exist");
    assert_eq!(stored.affected_assets, vec![assets[0], assets[1]]);
}

#[test]
fn test_failed_materialization_persists_nothing() {
    let (_temp_file, mut db) = create_test_db();
    let (station_id, _) = seed_station(&mut db, "Station 1", &[]);
    let mut plan = time_plan(
        &mut db,
        station_id,
        "Pump check",
        date(2024, 1, 1),
        Frequency::Daily,
        1,
        None,
    );
    // Foreign key on the origin plan rejects the header insert
    plan.id = 999;

    assert!(db.materialize_scheduled_order(&plan, date(2024, 1, 2)).is_err());
    let orders = db
        .list_orders(&OrderFilter::default())
        .expect("Failed to list orders");
    assert!(orders.is_empty());
}

#[test]
fn test_snapshot_failure_rolls_back_order_header() {
    let (temp_file, mut db) = create_test_db();
    let (station_id, assets) = seed_station(&mut db, "Station 1", &["B-1", "B-2"]);
    let plan = time_plan(
        &mut db,
        station_id,
        "Pump check",
        date(2024, 1, 1),
        Frequency::Daily,
        1,
        None,
    );
    for asset_id in &assets {
        db.add_plan_asset(plan.id, *asset_id).expect("Failed to add");
    }
    let plan = db.get_plan(plan.id).unwrap().unwrap();

    // The header insert succeeds; copying the assets does not
    let saboteur = rusqlite::Connection::open(temp_file.path()).expect("Failed to open");
    saboteur
        .execute_batch(
            "CREATE TRIGGER reject_snapshot BEFORE INSERT ON work_order_assets \
             BEGIN SELECT RAISE(ABORT, 'snapshot rejected'); END;",
        )
        .expect("Failed to create trigger");

    let err = db
        .materialize_scheduled_order(&plan, date(2024, 1, 2))
        .unwrap_err();
    assert!(matches!(err, UpkeepError::Database { .. }));
    assert!(
        db.list_orders(&OrderFilter::default())
            .expect("Failed to list orders")
            .is_empty()
    );

    let summary = generate_for_date(&mut db, date(2024, 1, 2)).expect("Run should succeed");
    assert_eq!(
        (summary.created, summary.skipped, summary.errors),
        (0, 0, 1)
    );
    assert!(
        db.list_orders(&OrderFilter::default())
            .expect("Failed to list orders")
            .is_empty()
    );
}

#[test]
fn test_second_live_order_for_same_date_is_rejected() {
    let (_temp_file, mut db) = create_test_db();
    let (station_id, _) = seed_station(&mut db, "Station 1", &[]);
    let plan = time_plan(
        &mut db,
        station_id,
        "Pump check",
        date(2024, 1, 1),
        Frequency::Daily,
        1,
        None,
    );

    let first = db
        .materialize_scheduled_order(&plan, date(2024, 1, 5))
        .expect("Failed to materialize");
    // Two overlapping runs both passed the existence check
    assert!(db.materialize_scheduled_order(&plan, date(2024, 1, 5)).is_err());
    assert_eq!(
        db.list_orders(&OrderFilter::default())
            .expect("Failed to list orders")
            .len(),
        1
    );

    // Once cancelled, the date is free again
    db.transition_order(first.id, OrderStatus::Cancelled)
        .expect("Failed to cancel");
    db.materialize_scheduled_order(&plan, date(2024, 1, 5))
        .expect("Failed to regenerate");
}

#[test]
fn test_has_scheduled_order_ignores_cancelled() {
    let (_temp_file, mut db) = create_test_db();
    let (station_id, _) = seed_station(&mut db, "Station 1", &[]);
    let plan = time_plan(
        &mut db,
        station_id,
        "Pump check",
        date(2024, 1, 1),
        Frequency::Daily,
        1,
        None,
    );

    assert!(!db.has_scheduled_order(plan.id, date(2024, 1, 5)).unwrap());

    let order = db
        .materialize_scheduled_order(&plan, date(2024, 1, 5))
        .expect("Failed to materialize");
    assert!(db.has_scheduled_order(plan.id, date(2024, 1, 5)).unwrap());
    assert!(!db.has_scheduled_order(plan.id, date(2024, 1, 6)).unwrap());

    db.transition_order(order.id, OrderStatus::Cancelled)
        .expect("Failed to cancel");
    assert!(!db.has_scheduled_order(plan.id, date(2024, 1, 5)).unwrap());
}

#[test]
fn test_deleting_plan_orphans_orders() {
    let (_temp_file, mut db) = create_test_db();
    let (station_id, assets) = seed_station(&mut db, "Station 1", &["B-1"]);
    let plan = time_plan(
        &mut db,
        station_id,
        "Pump check",
        date(2024, 1, 1),
        Frequency::Daily,
        1,
        None,
    );
    db.add_plan_asset(plan.id, assets[0]).expect("Failed to add");
    let plan = db.get_plan(plan.id).unwrap().unwrap();
    let order = db
        .materialize_scheduled_order(&plan, date(2024, 1, 1))
        .expect("Failed to materialize");

    db.delete_plan(plan.id).expect("Failed to delete plan");
    assert!(matches!(
        db.delete_plan(plan.id),
        Err(UpkeepError::PlanNotFound { .. })
    ));

    let stored = db.get_order(order.id).unwrap().unwrap();
    assert_eq!(stored.origin_plan_id, None);
    assert_eq!(stored.affected_assets, vec![assets[0]]);
}

#[test]
fn test_corrective_orders_and_filters() {
    let (_temp_file, mut db) = create_test_db();
    let (station_id, assets) = seed_station(&mut db, "Station 1", &["B-1"]);
    let (_, foreign) = seed_station(&mut db, "Station 2", &["X-1"]);

    assert!(matches!(
        db.create_corrective_order(station_id, date(2024, 2, 1), None, &foreign),
        Err(UpkeepError::InvalidInput { .. })
    ));
    assert!(matches!(
        db.create_corrective_order(station_id, date(2024, 2, 1), None, &[999]),
        Err(UpkeepError::AssetNotFound { id: 999 })
    ));

    let early = db
        .create_corrective_order(station_id, date(2024, 2, 1), Some("Rojas"), &assets)
        .expect("Failed to create order");
    let late = db
        .create_corrective_order(station_id, date(2024, 3, 1), None, &[])
        .expect("Failed to create order");

    let all = db
        .list_orders(&OrderFilter {
            station_id: Some(station_id),
            order_type: Some(OrderType::Corrective),
            ..Default::default()
        })
        .expect("Failed to list orders");
    assert_eq!(
        all.iter().map(|o| o.id).collect::<Vec<_>>(),
        vec![late.id, early.id]
    );

    let february = db
        .list_orders(&OrderFilter {
            scheduled_from: Some(date(2024, 2, 1)),
            scheduled_to: Some(date(2024, 2, 29)),
            ..Default::default()
        })
        .expect("Failed to list orders");
    assert_eq!(february.len(), 1);
    assert_eq!(february[0].assignee.as_deref(), Some("Rojas"));
    assert_eq!(february[0].affected_assets, assets);
}

#[test]
fn test_invalid_transitions_are_rejected() {
    let (_temp_file, mut db) = create_test_db();
    let (station_id, _) = seed_station(&mut db, "Station 1", &[]);
    let order = db
        .create_corrective_order(station_id, date(2024, 2, 1), None, &[])
        .expect("Failed to create order");

    db.transition_order(order.id, OrderStatus::Cancelled)
        .expect("Failed to cancel");

    let err = db
        .transition_order(order.id, OrderStatus::InProgress)
        .unwrap_err();
    assert!(matches!(
        err,
        UpkeepError::InvalidTransition {
            from: OrderStatus::Cancelled,
            to: OrderStatus::InProgress,
            ..
        }
    ));
}

#[test]
fn test_activity_grouping_window() {
    let (_temp_file, mut db) = create_test_db();
    let (station_id, _) = seed_station(&mut db, "Station 1", &[]);
    let plan = time_plan(
        &mut db,
        station_id,
        "Pump check",
        date(2024, 1, 1),
        Frequency::Daily,
        1,
        None,
    );

    let at = |time: &str| -> Zoned {
        format!("2024-05-06T{time}[America/Santiago]")
            .parse()
            .expect("valid zoned datetime")
    };

    let first = db
        .record_plan_asset_change(station_id, Some("ana"), plan.id, "Added Pump", &at("10:00:00"))
        .expect("Failed to record");
    let merged = db
        .record_plan_asset_change(station_id, Some("ana"), plan.id, "Added Saw", &at("10:14:00"))
        .expect("Failed to record");
    assert_eq!(merged.id, first.id);
    assert_eq!(merged.details["total_changes"], 2);
    assert_eq!(merged.details["change_history"][1], "10:14:00 - Added Saw");

    // Another actor starts their own entry
    let other = db
        .record_plan_asset_change(station_id, Some("luis"), plan.id, "Removed Saw", &at("10:15:00"))
        .expect("Failed to record");
    assert_ne!(other.id, first.id);

    // Outside the window the same actor gets a fresh entry
    let later = db
        .record_plan_asset_change(station_id, Some("ana"), plan.id, "Added Hose", &at("10:16:00"))
        .expect("Failed to record");
    assert_ne!(later.id, first.id);
    assert_eq!(later.details["total_changes"], 1);

    let log = db
        .list_activity(PLAN_TARGET, plan.id)
        .expect("Failed to list activity");
    assert_eq!(log.len(), 3);
    assert_eq!(log[0].id, later.id);
}

#[test]
fn test_unreadable_activity_details_restart_history() {
    let (temp_file, mut db) = create_test_db();
    let (station_id, _) = seed_station(&mut db, "Station 1", &[]);
    let plan = time_plan(
        &mut db,
        station_id,
        "Pump check",
        date(2024, 1, 1),
        Frequency::Daily,
        1,
        None,
    );
    let at = |time: &str| -> Zoned {
        format!("2024-05-06T{time}[America/Santiago]")
            .parse()
            .expect("valid zoned datetime")
    };

    let first = db
        .record_plan_asset_change(station_id, Some("ana"), plan.id, "Added Pump", &at("10:00:00"))
        .expect("Failed to record");

    let editor = rusqlite::Connection::open(temp_file.path()).expect("Failed to open");
    editor
        .execute(
            "UPDATE activity_log SET details = '\"garbled\"' WHERE id = ?1",
            [first.id as i64],
        )
        .expect("Failed to corrupt details");

    let merged = db
        .record_plan_asset_change(station_id, Some("ana"), plan.id, "Added Saw", &at("10:05:00"))
        .expect("Failed to record");
    assert_eq!(merged.id, first.id);
    assert_eq!(merged.details["total_changes"], 1);
    assert_eq!(merged.details["change_history"][0], "10:05:00 - Added Saw");
}
