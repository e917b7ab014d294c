//! AI itinerary suggestions, relayed to the browser as SSE.

use std::convert::Infallible;
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    response::sse::{Event as SseEvent, KeepAlive, Sse},
    routing::post,
    Extension, Json, Router,
};
use futures::stream::{Stream, StreamExt};

use crate::api::shared::ensure_trip_owner;
use crate::auth::AuthenticatedUser;
use crate::error::ApiResult;
use crate::main_lib::AppState;
use crate::models::SuggestionRequest;
use tripfolio_ai::{ActivityContext, TripContext};
use tripfolio_core::catalog::ActivitySearchQuery;
use tripfolio_core::trips::TripAggregate;

const CANDIDATES_PER_CITY: i64 = 20;

/// Assembles the generator's view of a trip: city names in day order and a
/// shortlist of catalog activities for each city.
fn build_trip_context(
    state: &AppState,
    aggregate: &TripAggregate,
    preferences: Option<String>,
) -> ApiResult<TripContext> {
    let mut city_ids: Vec<String> = Vec::new();
    for day in &aggregate.days {
        if !city_ids.contains(&day.day.city_id) {
            city_ids.push(day.day.city_id.clone());
        }
    }

    let mut cities = Vec::with_capacity(city_ids.len());
    let mut candidate_activities = Vec::new();
    for city_id in &city_ids {
        let city = state.catalog_service.get_city(city_id)?;
        let catalog = state
            .catalog_service
            .search_activities(ActivitySearchQuery {
                city_id: Some(city_id.clone()),
                page_size: Some(CANDIDATES_PER_CITY),
                ..Default::default()
            })?;
        for activity in catalog.activities {
            candidate_activities.push(ActivityContext {
                name: activity.name,
                category: activity.category.as_str().to_string(),
                city: city.name.clone(),
                estimated_cost: activity.estimated_cost,
                duration_minutes: activity.duration_minutes,
                rating: activity.rating,
            });
        }
        cities.push(city.name);
    }

    Ok(TripContext {
        trip_name: aggregate.trip.name.clone(),
        start_date: aggregate.trip.start_date,
        end_date: aggregate.trip.end_date,
        cities,
        total_budget: aggregate.trip.total_budget,
        preferences,
        candidate_activities,
    })
}

async fn stream_suggestions(
    Extension(user): Extension<AuthenticatedUser>,
    Path(trip_id): Path<String>,
    State(state): State<Arc<AppState>>,
    Json(payload): Json<SuggestionRequest>,
) -> ApiResult<Sse<impl Stream<Item = Result<SseEvent, Infallible>>>> {
    ensure_trip_owner(&state, &user, &trip_id)?;
    let aggregate = state.trip_service.get_aggregate(&trip_id)?;
    let context = build_trip_context(&state, &aggregate, payload.preferences)?;

    let events = state.generator.generate(context).await?;
    let sse_stream = events.map(|event| {
        let sse = SseEvent::default()
            .json_data(&event)
            .unwrap_or_else(|_| SseEvent::default().data("{}"));
        Ok::<_, Infallible>(sse)
    });

    Ok(Sse::new(sse_stream).keep_alive(KeepAlive::default()))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/trips/{trip_id}/ai/suggestions", post(stream_suggestions))
}
