use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, patch, post},
    Extension, Json, Router,
};
use serde::Deserialize;

use crate::api::shared::ensure_trip_owner;
use crate::auth::AuthenticatedUser;
use crate::error::ApiResult;
use crate::main_lib::AppState;
use crate::models::TripStatusUpdate;
use tripfolio_core::trips::{NewTrip, Trip, TripAggregate, TripStatus, TripUpdate};

#[derive(Deserialize)]
struct TripListQuery {
    status: Option<String>,
}

async fn list_trips(
    Extension(user): Extension<AuthenticatedUser>,
    Query(query): Query<TripListQuery>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<Trip>>> {
    let status = query
        .status
        .as_deref()
        .map(TripStatus::parse_str)
        .transpose()?;
    let trips = state.trip_service.list_trips(&user.id, status)?;
    Ok(Json(trips))
}

async fn create_trip(
    Extension(user): Extension<AuthenticatedUser>,
    State(state): State<Arc<AppState>>,
    Json(payload): Json<NewTrip>,
) -> ApiResult<(StatusCode, Json<Trip>)> {
    let trip = state.trip_service.create_trip(&user.id, payload).await?;
    Ok((StatusCode::CREATED, Json(trip)))
}

async fn get_trip(
    Extension(user): Extension<AuthenticatedUser>,
    Path(trip_id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Trip>> {
    let trip = ensure_trip_owner(&state, &user, &trip_id)?;
    Ok(Json(trip))
}

async fn get_trip_aggregate(
    Extension(user): Extension<AuthenticatedUser>,
    Path(trip_id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<TripAggregate>> {
    ensure_trip_owner(&state, &user, &trip_id)?;
    let aggregate = state.trip_service.get_aggregate(&trip_id)?;
    Ok(Json(aggregate))
}

async fn update_trip(
    Extension(user): Extension<AuthenticatedUser>,
    Path(trip_id): Path<String>,
    State(state): State<Arc<AppState>>,
    Json(payload): Json<TripUpdate>,
) -> ApiResult<Json<Trip>> {
    ensure_trip_owner(&state, &user, &trip_id)?;
    let trip = state.trip_service.update_trip(&trip_id, payload).await?;
    Ok(Json(trip))
}

async fn update_trip_status(
    Extension(user): Extension<AuthenticatedUser>,
    Path(trip_id): Path<String>,
    State(state): State<Arc<AppState>>,
    Json(payload): Json<TripStatusUpdate>,
) -> ApiResult<Json<Trip>> {
    ensure_trip_owner(&state, &user, &trip_id)?;
    let status = TripStatus::parse_str(&payload.status)?;
    let trip = state.trip_service.update_status(&trip_id, status).await?;
    Ok(Json(trip))
}

async fn delete_trip(
    Extension(user): Extension<AuthenticatedUser>,
    Path(trip_id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<StatusCode> {
    ensure_trip_owner(&state, &user, &trip_id)?;
    state.trip_service.delete_trip(&trip_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// "Duplicate my trip": deep copy owned by the caller, reset to DRAFT.
async fn duplicate_trip(
    Extension(user): Extension<AuthenticatedUser>,
    Path(trip_id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<(StatusCode, Json<TripAggregate>)> {
    ensure_trip_owner(&state, &user, &trip_id)?;
    let copy = state.trip_service.duplicate_trip(&trip_id, &user.id).await?;
    Ok((StatusCode::CREATED, Json(copy)))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/trips", get(list_trips).post(create_trip))
        .route(
            "/trips/{trip_id}",
            get(get_trip).put(update_trip).delete(delete_trip),
        )
        .route("/trips/{trip_id}/status", patch(update_trip_status))
        .route("/trips/{trip_id}/aggregate", get(get_trip_aggregate))
        .route("/trips/{trip_id}/duplicate", post(duplicate_trip))
}
