//! Database models for trips.

use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use tripfolio_core::errors::Error;
use tripfolio_core::trips::{Trip, TripStatus};

use crate::users::UserDB;
use crate::utils::parse_opt_decimal;

/// Database model for trips
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
#[diesel(belongs_to(UserDB, foreign_key = owner_id))]
#[diesel(table_name = crate::schema::trips)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct TripDB {
    pub id: String,
    pub owner_id: String,
    pub name: String,
    pub description: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub total_budget: Option<String>,
    pub status: String,
    pub cover_photo_url: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Partial changeset for trip scalar updates.
#[derive(AsChangeset, Debug, Clone)]
#[diesel(table_name = crate::schema::trips)]
pub struct TripChangeset {
    pub name: Option<String>,
    pub description: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub total_budget: Option<String>,
    pub cover_photo_url: Option<String>,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<TripDB> for Trip {
    type Error = Error;

    fn try_from(db: TripDB) -> Result<Self, Error> {
        Ok(Self {
            id: db.id,
            owner_id: db.owner_id,
            name: db.name,
            description: db.description,
            start_date: db.start_date,
            end_date: db.end_date,
            total_budget: parse_opt_decimal(db.total_budget.as_deref())?,
            status: TripStatus::parse_str(&db.status)?,
            cover_photo_url: db.cover_photo_url,
            created_at: db.created_at,
            updated_at: db.updated_at,
        })
    }
}

impl From<&Trip> for TripDB {
    fn from(trip: &Trip) -> Self {
        Self {
            id: trip.id.clone(),
            owner_id: trip.owner_id.clone(),
            name: trip.name.clone(),
            description: trip.description.clone(),
            start_date: trip.start_date,
            end_date: trip.end_date,
            total_budget: trip.total_budget.map(|b| b.to_string()),
            status: trip.status.as_str().to_string(),
            cover_photo_url: trip.cover_photo_url.clone(),
            created_at: trip.created_at,
            updated_at: trip.updated_at,
        }
    }
}
