//! Itinerary domain models.

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single day of a trip, spent in one city.
///
/// `day_number` is unique within a trip; `order_index` controls display order
/// and may diverge from `day_number` after manual reordering.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ItineraryDay {
    pub id: String,
    pub trip_id: String,
    pub city_id: String,
    pub day_number: i32,
    pub date: NaiveDate,
    pub notes: Option<String>,
    pub order_index: i32,
}

/// Input model for adding a day to a trip.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewItineraryDay {
    pub trip_id: String,
    pub city_id: String,
    pub day_number: i32,
    pub date: NaiveDate,
    pub notes: Option<String>,
    /// Appended after the trip's current last day when omitted.
    pub order_index: Option<i32>,
}

/// Partial update for an itinerary day.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItineraryDayUpdate {
    pub city_id: Option<String>,
    pub date: Option<NaiveDate>,
    pub notes: Option<String>,
    pub order_index: Option<i32>,
}

/// A catalog activity scheduled into an itinerary day.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledActivity {
    pub id: String,
    pub itinerary_day_id: String,
    pub activity_id: String,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub custom_notes: Option<String>,
    /// Overrides the catalog activity's estimated cost when present.
    pub custom_cost: Option<Decimal>,
    pub order_index: i32,
}

/// Input model for scheduling an activity into a day.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewScheduledActivity {
    pub itinerary_day_id: String,
    pub activity_id: String,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub custom_notes: Option<String>,
    pub custom_cost: Option<Decimal>,
    /// Appended after the day's current last entry when omitted.
    pub order_index: Option<i32>,
}

/// Partial update for a scheduled activity.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledActivityUpdate {
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub custom_notes: Option<String>,
    pub custom_cost: Option<Decimal>,
    pub order_index: Option<i32>,
}

/// A day together with its scheduled activities, ordered for display.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ItineraryDayWithActivities {
    pub day: ItineraryDay,
    pub activities: Vec<ScheduledActivity>,
}
