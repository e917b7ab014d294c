//! Tests for trip duplication.

use std::collections::HashSet;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::duplicate::duplicate_trip;
use super::trips_model::{Trip, TripAggregate, TripStatus};
use crate::budget::{BudgetAllocation, BudgetCategory};
use crate::itinerary::{ItineraryDay, ItineraryDayWithActivities, ScheduledActivity};

fn test_now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 10, 1)
        .unwrap()
        .and_hms_opt(8, 30, 0)
        .unwrap()
}

fn scheduled(id: &str, day_id: &str, activity_id: &str, order_index: i32) -> ScheduledActivity {
    ScheduledActivity {
        id: id.to_string(),
        itinerary_day_id: day_id.to_string(),
        activity_id: activity_id.to_string(),
        start_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
        end_time: NaiveTime::from_hms_opt(11, 0, 0).unwrap(),
        custom_notes: Some("bring tickets".to_string()),
        custom_cost: Some(dec!(18.50)),
        order_index,
    }
}

fn sample_aggregate(status: TripStatus) -> TripAggregate {
    let trip = Trip {
        id: "trip-src".to_string(),
        owner_id: "owner-1".to_string(),
        name: "Andalusia".to_string(),
        description: Some("Spring break".to_string()),
        start_date: NaiveDate::from_ymd_opt(2025, 4, 10).unwrap(),
        end_date: NaiveDate::from_ymd_opt(2025, 4, 17).unwrap(),
        total_budget: Some(dec!(2200)),
        status,
        cover_photo_url: Some("https://img.example/andalusia.jpg".to_string()),
        created_at: test_now(),
        updated_at: test_now(),
    };

    let day1 = ItineraryDay {
        id: "day-1".to_string(),
        trip_id: "trip-src".to_string(),
        city_id: "city-seville".to_string(),
        day_number: 1,
        date: NaiveDate::from_ymd_opt(2025, 4, 10).unwrap(),
        notes: Some("arrival".to_string()),
        order_index: 0,
    };
    let day2 = ItineraryDay {
        id: "day-2".to_string(),
        trip_id: "trip-src".to_string(),
        city_id: "city-granada".to_string(),
        day_number: 2,
        date: NaiveDate::from_ymd_opt(2025, 4, 11).unwrap(),
        notes: None,
        // Display order diverges from day_number; must survive the copy.
        order_index: 5,
    };

    TripAggregate {
        trip,
        days: vec![
            ItineraryDayWithActivities {
                day: day1,
                activities: vec![
                    scheduled("sched-a", "day-1", "act-alcazar", 0),
                    scheduled("sched-b", "day-1", "act-tapas", 1),
                ],
            },
            ItineraryDayWithActivities {
                day: day2,
                activities: vec![],
            },
        ],
        allocations: vec![BudgetAllocation {
            id: "alloc-food".to_string(),
            trip_id: "trip-src".to_string(),
            category: BudgetCategory::Food,
            allocated: dec!(300),
            spent: dec!(150),
        }],
    }
}

#[test]
fn test_copy_preserves_structure_and_counts() {
    let source = sample_aggregate(TripStatus::Planning);
    let copy = duplicate_trip(&source, "owner-1", test_now());

    assert_eq!(copy.days.len(), 2);
    assert_eq!(copy.days[0].activities.len(), 2);
    assert_eq!(copy.days[1].activities.len(), 0);
    assert_eq!(copy.allocations.len(), 1);

    assert_eq!(copy.days[0].day.day_number, 1);
    assert_eq!(copy.days[1].day.day_number, 2);
    assert_eq!(copy.days[0].day.order_index, 0);
    assert_eq!(copy.days[1].day.order_index, 5);
    assert_eq!(copy.days[0].activities[0].order_index, 0);
    assert_eq!(copy.days[0].activities[1].order_index, 1);
}

#[test]
fn test_copy_has_no_shared_identities() {
    let source = sample_aggregate(TripStatus::Planning);
    let copy = duplicate_trip(&source, "owner-1", test_now());

    let mut source_ids: HashSet<String> = HashSet::new();
    source_ids.insert(source.trip.id.clone());
    for day in &source.days {
        source_ids.insert(day.day.id.clone());
        for entry in &day.activities {
            source_ids.insert(entry.id.clone());
        }
    }
    for allocation in &source.allocations {
        source_ids.insert(allocation.id.clone());
    }

    assert!(!source_ids.contains(&copy.trip.id));
    for day in &copy.days {
        assert!(!source_ids.contains(&day.day.id));
        assert_eq!(day.day.trip_id, copy.trip.id);
        for entry in &day.activities {
            assert!(!source_ids.contains(&entry.id));
            // Foreign keys point at the new parents, never the originals.
            assert_eq!(entry.itinerary_day_id, day.day.id);
        }
    }
    for allocation in &copy.allocations {
        assert!(!source_ids.contains(&allocation.id));
        assert_eq!(allocation.trip_id, copy.trip.id);
    }
}

#[test]
fn test_copy_preserves_catalog_references_and_scalars() {
    let source = sample_aggregate(TripStatus::Confirmed);
    let copy = duplicate_trip(&source, "owner-1", test_now());

    assert_eq!(copy.trip.name, "Andalusia (Copy)");
    assert_eq!(copy.trip.description, source.trip.description);
    assert_eq!(copy.trip.start_date, source.trip.start_date);
    assert_eq!(copy.trip.end_date, source.trip.end_date);
    assert_eq!(copy.trip.total_budget, source.trip.total_budget);
    assert_eq!(copy.trip.cover_photo_url, source.trip.cover_photo_url);

    assert_eq!(copy.days[0].day.city_id, "city-seville");
    assert_eq!(copy.days[1].day.city_id, "city-granada");
    assert_eq!(copy.days[0].activities[0].activity_id, "act-alcazar");
    assert_eq!(copy.days[0].activities[1].activity_id, "act-tapas");
    assert_eq!(copy.days[0].activities[0].custom_cost, Some(dec!(18.50)));
    assert_eq!(
        copy.days[0].activities[0].custom_notes,
        Some("bring tickets".to_string())
    );
}

#[test]
fn test_copy_is_always_draft() {
    for status in [
        TripStatus::Draft,
        TripStatus::Planning,
        TripStatus::Confirmed,
        TripStatus::InProgress,
        TripStatus::Completed,
        TripStatus::Cancelled,
    ] {
        let source = sample_aggregate(status);
        let copy = duplicate_trip(&source, "owner-1", test_now());
        assert_eq!(copy.trip.status, TripStatus::Draft);
    }
}

#[test]
fn test_copy_resets_spent_amounts() {
    let source = sample_aggregate(TripStatus::InProgress);
    let copy = duplicate_trip(&source, "owner-1", test_now());

    assert_eq!(copy.allocations[0].category, BudgetCategory::Food);
    assert_eq!(copy.allocations[0].allocated, dec!(300));
    assert_eq!(copy.allocations[0].spent, Decimal::ZERO);
}

#[test]
fn test_copy_for_different_owner() {
    // "Copy a shared trip": the new owner is not the source owner.
    let source = sample_aggregate(TripStatus::Planning);
    let copy = duplicate_trip(&source, "owner-2", test_now());

    assert_eq!(copy.trip.owner_id, "owner-2");
    assert_eq!(source.trip.owner_id, "owner-1");
}

#[test]
fn test_duplicating_twice_yields_independent_copies() {
    let source = sample_aggregate(TripStatus::Planning);
    let first = duplicate_trip(&source, "owner-1", test_now());
    let second = duplicate_trip(&source, "owner-1", test_now());

    assert_ne!(first.trip.id, second.trip.id);
    assert_ne!(first.days[0].day.id, second.days[0].day.id);
    assert_ne!(first.allocations[0].id, second.allocations[0].id);
    // Same shape, same preserved ordering.
    assert_eq!(first.trip.name, second.trip.name);
    assert_eq!(first.days.len(), second.days.len());
}

#[test]
fn test_mutating_copy_leaves_source_untouched() {
    let source = sample_aggregate(TripStatus::Planning);
    let mut copy = duplicate_trip(&source, "owner-1", test_now());

    copy.days[0].activities[0].custom_notes = Some("changed".to_string());
    copy.allocations[0].allocated = dec!(9999);

    assert_eq!(
        source.days[0].activities[0].custom_notes,
        Some("bring tickets".to_string())
    );
    assert_eq!(source.allocations[0].allocated, dec!(300));
}
