//! Trip duplication.
//!
//! Structural deep copy of a fully-loaded trip aggregate: fresh identities
//! throughout, child foreign keys remapped to the new parents, and mutable
//! state reset (status back to draft, recorded spend back to zero). Pure
//! computation over the in-memory aggregate; loading the source and
//! persisting the copy are the caller's job.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use uuid::Uuid;

use super::trips_model::{Trip, TripAggregate, TripStatus};
use crate::budget::BudgetAllocation;
use crate::constants::COPY_SUFFIX;
use crate::itinerary::{ItineraryDay, ItineraryDayWithActivities, ScheduledActivity};

/// Deep-copies `source` into an independent aggregate owned by
/// `new_owner_id` (which may equal the source owner).
///
/// Scalar fields are copied verbatim apart from the name, which gets the
/// fixed copy suffix. `day_number` and both levels of `order_index` are
/// preserved exactly, so the copy renders in the same order as the source.
/// No row is shared by reference: mutating the returned aggregate never
/// affects the source, and re-running the function produces another,
/// independently-identified copy.
///
/// `now` is supplied by the caller and stamped on every new row.
pub fn duplicate_trip(
    source: &TripAggregate,
    new_owner_id: &str,
    now: NaiveDateTime,
) -> TripAggregate {
    let new_trip_id = Uuid::new_v4().to_string();

    let trip = Trip {
        id: new_trip_id.clone(),
        owner_id: new_owner_id.to_string(),
        name: format!("{}{}", source.trip.name, COPY_SUFFIX),
        description: source.trip.description.clone(),
        start_date: source.trip.start_date,
        end_date: source.trip.end_date,
        total_budget: source.trip.total_budget,
        status: TripStatus::Draft,
        cover_photo_url: source.trip.cover_photo_url.clone(),
        created_at: now,
        updated_at: now,
    };

    let days = source
        .days
        .iter()
        .map(|source_day| {
            let new_day_id = Uuid::new_v4().to_string();
            let day = ItineraryDay {
                id: new_day_id.clone(),
                trip_id: new_trip_id.clone(),
                city_id: source_day.day.city_id.clone(),
                day_number: source_day.day.day_number,
                date: source_day.day.date,
                notes: source_day.day.notes.clone(),
                order_index: source_day.day.order_index,
            };
            let activities = source_day
                .activities
                .iter()
                .map(|entry| ScheduledActivity {
                    id: Uuid::new_v4().to_string(),
                    itinerary_day_id: new_day_id.clone(),
                    activity_id: entry.activity_id.clone(),
                    start_time: entry.start_time,
                    end_time: entry.end_time,
                    custom_notes: entry.custom_notes.clone(),
                    custom_cost: entry.custom_cost,
                    order_index: entry.order_index,
                })
                .collect();
            ItineraryDayWithActivities { day, activities }
        })
        .collect();

    let allocations = source
        .allocations
        .iter()
        .map(|allocation| BudgetAllocation {
            id: Uuid::new_v4().to_string(),
            trip_id: new_trip_id.clone(),
            category: allocation.category,
            allocated: allocation.allocated,
            // A fresh copy starts with no recorded spend.
            spent: Decimal::ZERO,
        })
        .collect();

    TripAggregate {
        trip,
        days,
        allocations,
    }
}
