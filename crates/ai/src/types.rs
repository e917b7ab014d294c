//! Shared DTOs and stream events for the itinerary generator.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Catalog activity summary fed into the prompt.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ActivityContext {
    pub name: String,
    pub category: String,
    pub city: String,
    pub estimated_cost: Decimal,
    pub duration_minutes: i32,
    pub rating: Decimal,
}

/// Everything the generator knows about the trip being planned.
///
/// Assembled by the server from the trip aggregate and the catalog; the
/// generator itself never touches storage.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TripContext {
    pub trip_name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub cities: Vec<String>,
    pub total_budget: Option<Decimal>,
    /// Free-text wishes from the request body ("slow mornings", "no museums").
    pub preferences: Option<String>,
    pub candidate_activities: Vec<ActivityContext>,
}

impl TripContext {
    pub fn day_count(&self) -> i64 {
        (self.end_date - self.start_date).num_days() + 1
    }
}

/// A fully-rendered request for the provider client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub model: String,
    pub system_prompt: String,
    pub user_prompt: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

/// Events relayed to the browser while a suggestion streams in.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum SuggestionEvent {
    /// A chunk of generated text.
    #[serde(rename_all = "camelCase")]
    TextDelta { delta: String },
    /// Generation finished; carries the full concatenated text.
    #[serde(rename_all = "camelCase")]
    Done { full_text: String },
    /// The provider stream failed mid-flight.
    #[serde(rename_all = "camelCase")]
    Error { message: String },
}
