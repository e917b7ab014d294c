//! Database models for trip share links.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use tripfolio_core::errors::Error;
use tripfolio_core::sharing::{SharePermission, TripShare};

use crate::trips::TripDB;

/// Database model for trip shares
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
#[diesel(table_name = crate::schema::trip_shares)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct TripShareDB {
    pub id: String,
    pub trip_id: String,
    pub slug: String,
    pub permission: String,
    pub created_at: NaiveDateTime,
    pub expires_at: Option<NaiveDateTime>,
}

impl TryFrom<TripShareDB> for TripShare {
    type Error = Error;

    fn try_from(db: TripShareDB) -> Result<Self, Error> {
        Ok(Self {
            id: db.id,
            trip_id: db.trip_id,
            slug: db.slug,
            permission: SharePermission::parse_str(&db.permission)?,
            created_at: db.created_at,
            expires_at: db.expires_at,
        })
    }
}
