//! Trip domain models.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::budget::BudgetAllocation;
use crate::errors::{Error, Result, ValidationError};
use crate::itinerary::ItineraryDayWithActivities;

/// Lifecycle status of a trip. Advisory labels; duplication always resets
/// the copy to `Draft`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TripStatus {
    #[default]
    Draft,
    Planning,
    Confirmed,
    InProgress,
    Completed,
    Cancelled,
}

impl TripStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TripStatus::Draft => "DRAFT",
            TripStatus::Planning => "PLANNING",
            TripStatus::Confirmed => "CONFIRMED",
            TripStatus::InProgress => "IN_PROGRESS",
            TripStatus::Completed => "COMPLETED",
            TripStatus::Cancelled => "CANCELLED",
        }
    }

    pub fn parse_str(value: &str) -> Result<Self> {
        match value {
            "DRAFT" => Ok(TripStatus::Draft),
            "PLANNING" => Ok(TripStatus::Planning),
            "CONFIRMED" => Ok(TripStatus::Confirmed),
            "IN_PROGRESS" => Ok(TripStatus::InProgress),
            "COMPLETED" => Ok(TripStatus::Completed),
            "CANCELLED" => Ok(TripStatus::Cancelled),
            other => Err(Error::Validation(ValidationError::InvalidInput(format!(
                "Unknown trip status '{}'",
                other
            )))),
        }
    }
}

/// Domain model representing a trip.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Trip {
    pub id: String,
    pub owner_id: String,
    pub name: String,
    pub description: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Overall ceiling the owner set for the whole trip, independent of the
    /// per-category allocations.
    pub total_budget: Option<Decimal>,
    pub status: TripStatus,
    pub cover_photo_url: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Input model for creating a new trip.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTrip {
    pub name: String,
    pub description: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub total_budget: Option<Decimal>,
    pub cover_photo_url: Option<String>,
}

/// Partial update for a trip's scalar fields.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub total_budget: Option<Decimal>,
    pub cover_photo_url: Option<String>,
}

/// A trip with all of its children loaded: ordered itinerary days (each with
/// its ordered scheduled activities) and budget allocations.
///
/// This is the unit the duplicator operates on and the storage layer persists
/// transactionally.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TripAggregate {
    pub trip: Trip,
    pub days: Vec<ItineraryDayWithActivities>,
    pub allocations: Vec<BudgetAllocation>,
}
