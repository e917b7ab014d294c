//! Catalog domain models: cities and the activities offered in them.
//!
//! The catalog is read-only from the application's perspective; rows are
//! seeded by migrations and only ever referenced by itineraries.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result, ValidationError};

/// A destination city.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct City {
    pub id: String,
    pub name: String,
    pub country: String,
    pub country_code: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub description: Option<String>,
    pub image_url: Option<String>,
}

/// Category of a catalog activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActivityCategory {
    Sightseeing,
    Culture,
    FoodDrink,
    Outdoors,
    Nightlife,
    Shopping,
    Relaxation,
    Transport,
}

impl ActivityCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityCategory::Sightseeing => "SIGHTSEEING",
            ActivityCategory::Culture => "CULTURE",
            ActivityCategory::FoodDrink => "FOOD_DRINK",
            ActivityCategory::Outdoors => "OUTDOORS",
            ActivityCategory::Nightlife => "NIGHTLIFE",
            ActivityCategory::Shopping => "SHOPPING",
            ActivityCategory::Relaxation => "RELAXATION",
            ActivityCategory::Transport => "TRANSPORT",
        }
    }

    pub fn parse_str(value: &str) -> Result<Self> {
        match value {
            "SIGHTSEEING" => Ok(ActivityCategory::Sightseeing),
            "CULTURE" => Ok(ActivityCategory::Culture),
            "FOOD_DRINK" => Ok(ActivityCategory::FoodDrink),
            "OUTDOORS" => Ok(ActivityCategory::Outdoors),
            "NIGHTLIFE" => Ok(ActivityCategory::Nightlife),
            "SHOPPING" => Ok(ActivityCategory::Shopping),
            "RELAXATION" => Ok(ActivityCategory::Relaxation),
            "TRANSPORT" => Ok(ActivityCategory::Transport),
            other => Err(Error::Validation(ValidationError::InvalidInput(format!(
                "Unknown activity category '{}'",
                other
            )))),
        }
    }
}

/// A catalog activity, offered in a specific city.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    pub id: String,
    pub city_id: String,
    pub name: String,
    pub category: ActivityCategory,
    /// Estimated cost per person.
    pub estimated_cost: Decimal,
    pub duration_minutes: i32,
    /// Average rating, 0 to 5.
    pub rating: Decimal,
    pub description: Option<String>,
    pub image_url: Option<String>,
}

/// Search parameters for cities.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CitySearchQuery {
    /// Substring matched against name and country.
    pub search: Option<String>,
    pub page: Option<i64>,
    pub page_size: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CitySearchResponse {
    pub cities: Vec<City>,
    pub total: i64,
    pub page: i64,
    pub page_size: i64,
}

/// Search parameters for activities.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivitySearchQuery {
    pub city_id: Option<String>,
    pub category: Option<ActivityCategory>,
    pub max_cost: Option<Decimal>,
    pub min_rating: Option<Decimal>,
    pub search: Option<String>,
    pub page: Option<i64>,
    pub page_size: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivitySearchResponse {
    pub activities: Vec<Activity>,
    pub total: i64,
    pub page: i64,
    pub page_size: i64,
}
