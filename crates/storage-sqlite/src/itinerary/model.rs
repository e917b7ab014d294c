//! Database models for itinerary days and scheduled activities.

use chrono::{NaiveDate, NaiveTime};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use tripfolio_core::errors::Error;
use tripfolio_core::itinerary::{ItineraryDay, ScheduledActivity};

use crate::trips::TripDB;
use crate::utils::parse_opt_decimal;

/// Database model for itinerary days
#[derive(
    Queryable,
    Identifiable,
    Insertable,
    Selectable,
    Associations,
    PartialEq,
    Serialize,
    Deserialize,
    Debug,
    Clone,
)]
#[diesel(belongs_to(TripDB, foreign_key = trip_id))]
#[diesel(table_name = crate::schema::itinerary_days)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct ItineraryDayDB {
    pub id: String,
    pub trip_id: String,
    pub city_id: String,
    pub day_number: i32,
    pub date: NaiveDate,
    pub notes: Option<String>,
    pub order_index: i32,
}

/// Partial changeset for day updates.
#[derive(AsChangeset, Debug, Clone)]
#[diesel(table_name = crate::schema::itinerary_days)]
pub struct ItineraryDayChangeset {
    pub city_id: Option<String>,
    pub date: Option<NaiveDate>,
    pub notes: Option<String>,
    pub order_index: Option<i32>,
}

impl From<ItineraryDayDB> for ItineraryDay {
    fn from(db: ItineraryDayDB) -> Self {
        Self {
            id: db.id,
            trip_id: db.trip_id,
            city_id: db.city_id,
            day_number: db.day_number,
            date: db.date,
            notes: db.notes,
            order_index: db.order_index,
        }
    }
}

impl From<&ItineraryDay> for ItineraryDayDB {
    fn from(day: &ItineraryDay) -> Self {
        Self {
            id: day.id.clone(),
            trip_id: day.trip_id.clone(),
            city_id: day.city_id.clone(),
            day_number: day.day_number,
            date: day.date,
            notes: day.notes.clone(),
            order_index: day.order_index,
        }
    }
}

/// Database model for scheduled activities
#[derive(
    Queryable,
    Identifiable,
    Insertable,
    Selectable,
    Associations,
    PartialEq,
    Serialize,
    Deserialize,
    Debug,
    Clone,
)]
#[diesel(belongs_to(ItineraryDayDB, foreign_key = itinerary_day_id))]
#[diesel(table_name = crate::schema::scheduled_activities)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct ScheduledActivityDB {
    pub id: String,
    pub itinerary_day_id: String,
    pub activity_id: String,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub custom_notes: Option<String>,
    pub custom_cost: Option<String>,
    pub order_index: i32,
}

/// Partial changeset for scheduled-activity updates.
#[derive(AsChangeset, Debug, Clone)]
#[diesel(table_name = crate::schema::scheduled_activities)]
pub struct ScheduledActivityChangeset {
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub custom_notes: Option<String>,
    pub custom_cost: Option<String>,
    pub order_index: Option<i32>,
}

impl TryFrom<ScheduledActivityDB> for ScheduledActivity {
    type Error = Error;

    fn try_from(db: ScheduledActivityDB) -> Result<Self, Error> {
        Ok(Self {
            id: db.id,
            itinerary_day_id: db.itinerary_day_id,
            activity_id: db.activity_id,
            start_time: db.start_time,
            end_time: db.end_time,
            custom_notes: db.custom_notes,
            custom_cost: parse_opt_decimal(db.custom_cost.as_deref())?,
            order_index: db.order_index,
        })
    }
}

impl From<&ScheduledActivity> for ScheduledActivityDB {
    fn from(entry: &ScheduledActivity) -> Self {
        Self {
            id: entry.id.clone(),
            itinerary_day_id: entry.itinerary_day_id.clone(),
            activity_id: entry.activity_id.clone(),
            start_time: entry.start_time,
            end_time: entry.end_time,
            custom_notes: entry.custom_notes.clone(),
            custom_cost: entry.custom_cost.map(|c| c.to_string()),
            order_index: entry.order_index,
        }
    }
}
