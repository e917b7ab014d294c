//! Database models for the city/activity catalog.

use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use tripfolio_core::catalog::{Activity, ActivityCategory, City};
use tripfolio_core::errors::Error;

use crate::utils::parse_decimal;

/// Database model for cities
#[derive(Queryable, Identifiable, Selectable, PartialEq, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::cities)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct CityDB {
    pub id: String,
    pub name: String,
    pub country: String,
    pub country_code: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub description: Option<String>,
    pub image_url: Option<String>,
}

impl From<CityDB> for City {
    fn from(db: CityDB) -> Self {
        Self {
            id: db.id,
            name: db.name,
            country: db.country,
            country_code: db.country_code,
            latitude: db.latitude,
            longitude: db.longitude,
            description: db.description,
            image_url: db.image_url,
        }
    }
}

/// Database model for catalog activities
#[derive(
    Queryable,
    Identifiable,
    Selectable,
    Associations,
    PartialEq,
    Serialize,
    Deserialize,
    Debug,
    Clone,
)]
#[diesel(belongs_to(CityDB, foreign_key = city_id))]
#[diesel(table_name = crate::schema::activities)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct ActivityDB {
    pub id: String,
    pub city_id: String,
    pub name: String,
    pub category: String,
    pub estimated_cost: String,
    pub duration_minutes: i32,
    pub rating: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
}

// Category and money columns are TEXT; decoding can fail, so the
// conversion is fallible.
impl TryFrom<ActivityDB> for Activity {
    type Error = Error;

    fn try_from(db: ActivityDB) -> Result<Self, Error> {
        Ok(Self {
            id: db.id,
            city_id: db.city_id,
            name: db.name,
            category: ActivityCategory::parse_str(&db.category)?,
            estimated_cost: parse_decimal(&db.estimated_cost)?,
            duration_minutes: db.duration_minutes,
            rating: parse_decimal(&db.rating)?,
            description: db.description,
            image_url: db.image_url,
        })
    }
}
