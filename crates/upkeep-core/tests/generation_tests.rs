mod common;

use common::{create_test_db, seed_station, time_plan};
use jiff::{Zoned, civil::date};
use upkeep_core::{
    FixedClock, Frequency, OrderFilter, Outcome, Weekday, generate_for_date,
    run_daily_generation,
};

#[test]
fn test_weekly_plan_every_other_monday() {
    let (_temp_file, mut db) = create_test_db();
    let (station_id, assets) = seed_station(&mut db, "Station 1", &["M-1", "M-2"]);
    let plan = time_plan(
        &mut db,
        station_id,
        "Chainsaw service",
        date(2024, 1, 1),
        Frequency::Weekly,
        2,
        Some(Weekday::Monday),
    );
    for asset_id in &assets {
        db.add_plan_asset(plan.id, *asset_id).expect("Failed to add");
    }

    let mut created_on = Vec::new();
    let mut day = date(2024, 1, 1);
    while day <= date(2024, 2, 11) {
        let summary = generate_for_date(&mut db, day).expect("Run should succeed");
        if summary.created == 1 {
            created_on.push(day);
        }
        day = day.tomorrow().unwrap();
    }

    assert_eq!(
        created_on,
        vec![
            date(2024, 1, 1),
            date(2024, 1, 15),
            date(2024, 1, 29),
        ]
    );

    let orders = db
        .list_orders(&OrderFilter {
            origin_plan_id: Some(plan.id),
            ..Default::default()
        })
        .expect("Failed to list orders");
    assert_eq!(orders.len(), 3);
    assert!(orders.iter().all(|o| o.affected_assets == assets));
}

#[test]
fn test_monthly_plan_skips_short_months() {
    let (_temp_file, mut db) = create_test_db();
    let (station_id, _) = seed_station(&mut db, "Station 1", &[]);
    time_plan(
        &mut db,
        station_id,
        "Extinguisher check",
        date(2024, 1, 31),
        Frequency::Monthly,
        1,
        None,
    );

    for (day, expected) in [
        (date(2024, 1, 31), 1),
        (date(2024, 2, 29), 0),
        (date(2024, 3, 31), 1),
        (date(2024, 4, 30), 0),
    ] {
        let summary = generate_for_date(&mut db, day).expect("Run should succeed");
        assert_eq!(summary.created, expected, "unexpected result on {day}");
    }
}

#[test]
fn test_rerun_for_same_date_only_skips() {
    let (_temp_file, mut db) = create_test_db();
    let (station_id, _) = seed_station(&mut db, "Station 1", &[]);
    for name in ["Pump check", "Hose test"] {
        time_plan(
            &mut db,
            station_id,
            name,
            date(2024, 1, 1),
            Frequency::Daily,
            1,
            None,
        );
    }

    let first = generate_for_date(&mut db, date(2024, 1, 10)).expect("Run should succeed");
    let second = generate_for_date(&mut db, date(2024, 1, 10)).expect("Run should succeed");

    assert_eq!((first.created, first.skipped), (2, 0));
    assert_eq!((second.created, second.skipped), (0, 2));
    assert!(
        second
            .outcomes
            .iter()
            .all(|o| o.outcome == Outcome::Skipped)
    );

    let orders = db
        .list_orders(&OrderFilter::default())
        .expect("Failed to list orders");
    assert_eq!(orders.len(), 2);
}

#[test]
fn test_weekly_plan_without_weekday_never_fires() {
    let (_temp_file, mut db) = create_test_db();
    let (station_id, _) = seed_station(&mut db, "Station 1", &[]);
    time_plan(
        &mut db,
        station_id,
        "Unpinned",
        date(2024, 1, 1),
        Frequency::Weekly,
        1,
        None,
    );

    for offset in 0..7 {
        let day = date(2024, 1, 1) + jiff::Span::new().days(offset);
        let summary = generate_for_date(&mut db, day).expect("Run should succeed");
        assert_eq!(summary.created, 0);
    }
}

#[test]
fn test_default_target_uses_clock_date() {
    let (_temp_file, mut db) = create_test_db();
    let (station_id, _) = seed_station(&mut db, "Station 1", &[]);
    time_plan(
        &mut db,
        station_id,
        "Pump check",
        date(2024, 1, 1),
        Frequency::Daily,
        1,
        None,
    );

    // Late evening in Santiago is already the next day in UTC
    let now: Zoned = "2024-03-04T22:30[America/Santiago]".parse().unwrap();
    let summary =
        run_daily_generation(&mut db, &FixedClock(now), None).expect("Run should succeed");

    assert_eq!(summary.target_date, date(2024, 3, 4));
    let orders = db
        .list_orders(&OrderFilter::default())
        .expect("Failed to list orders");
    assert_eq!(orders[0].scheduled_date, date(2024, 3, 4));
}
