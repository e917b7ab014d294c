use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post, put},
    Extension, Json, Router,
};

use crate::api::shared::{ensure_day_owner, ensure_scheduled_owner, ensure_trip_owner};
use crate::auth::AuthenticatedUser;
use crate::error::ApiResult;
use crate::main_lib::AppState;
use crate::models::ReorderRequest;
use tripfolio_core::itinerary::{
    ItineraryDay, ItineraryDayUpdate, ItineraryDayWithActivities, NewItineraryDay,
    NewScheduledActivity, ScheduledActivity, ScheduledActivityUpdate,
};

async fn list_days(
    Extension(user): Extension<AuthenticatedUser>,
    Path(trip_id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<ItineraryDayWithActivities>>> {
    ensure_trip_owner(&state, &user, &trip_id)?;
    let days = state.itinerary_service.get_days_for_trip(&trip_id)?;
    Ok(Json(days))
}

async fn add_day(
    Extension(user): Extension<AuthenticatedUser>,
    Path(trip_id): Path<String>,
    State(state): State<Arc<AppState>>,
    Json(mut payload): Json<NewItineraryDay>,
) -> ApiResult<(StatusCode, Json<ItineraryDay>)> {
    ensure_trip_owner(&state, &user, &trip_id)?;
    // The path is authoritative, whatever the body claims.
    payload.trip_id = trip_id;
    let day = state.itinerary_service.add_day(payload).await?;
    Ok((StatusCode::CREATED, Json(day)))
}

async fn reorder_days(
    Extension(user): Extension<AuthenticatedUser>,
    Path(trip_id): Path<String>,
    State(state): State<Arc<AppState>>,
    Json(payload): Json<ReorderRequest>,
) -> ApiResult<StatusCode> {
    ensure_trip_owner(&state, &user, &trip_id)?;
    state
        .itinerary_service
        .reorder_days(&trip_id, payload.ordered_ids)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn update_day(
    Extension(user): Extension<AuthenticatedUser>,
    Path(day_id): Path<String>,
    State(state): State<Arc<AppState>>,
    Json(payload): Json<ItineraryDayUpdate>,
) -> ApiResult<Json<ItineraryDay>> {
    ensure_day_owner(&state, &user, &day_id)?;
    let day = state.itinerary_service.update_day(&day_id, payload).await?;
    Ok(Json(day))
}

async fn remove_day(
    Extension(user): Extension<AuthenticatedUser>,
    Path(day_id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<StatusCode> {
    ensure_day_owner(&state, &user, &day_id)?;
    state.itinerary_service.remove_day(&day_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn schedule_activity(
    Extension(user): Extension<AuthenticatedUser>,
    Path(day_id): Path<String>,
    State(state): State<Arc<AppState>>,
    Json(mut payload): Json<NewScheduledActivity>,
) -> ApiResult<(StatusCode, Json<ScheduledActivity>)> {
    ensure_day_owner(&state, &user, &day_id)?;
    payload.itinerary_day_id = day_id;
    let scheduled = state.itinerary_service.schedule_activity(payload).await?;
    Ok((StatusCode::CREATED, Json(scheduled)))
}

async fn reorder_day_activities(
    Extension(user): Extension<AuthenticatedUser>,
    Path(day_id): Path<String>,
    State(state): State<Arc<AppState>>,
    Json(payload): Json<ReorderRequest>,
) -> ApiResult<StatusCode> {
    ensure_day_owner(&state, &user, &day_id)?;
    state
        .itinerary_service
        .reorder_scheduled_activities(&day_id, payload.ordered_ids)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn update_scheduled_activity(
    Extension(user): Extension<AuthenticatedUser>,
    Path(scheduled_id): Path<String>,
    State(state): State<Arc<AppState>>,
    Json(payload): Json<ScheduledActivityUpdate>,
) -> ApiResult<Json<ScheduledActivity>> {
    ensure_scheduled_owner(&state, &user, &scheduled_id)?;
    let scheduled = state
        .itinerary_service
        .update_scheduled_activity(&scheduled_id, payload)
        .await?;
    Ok(Json(scheduled))
}

async fn remove_scheduled_activity(
    Extension(user): Extension<AuthenticatedUser>,
    Path(scheduled_id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<StatusCode> {
    ensure_scheduled_owner(&state, &user, &scheduled_id)?;
    state
        .itinerary_service
        .remove_scheduled_activity(&scheduled_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/trips/{trip_id}/days", get(list_days).post(add_day))
        .route("/trips/{trip_id}/days/reorder", put(reorder_days))
        .route("/days/{day_id}", put(update_day).delete(remove_day))
        .route("/days/{day_id}/activities", post(schedule_activity))
        .route(
            "/days/{day_id}/activities/reorder",
            put(reorder_day_activities),
        )
        .route(
            "/scheduled/{scheduled_id}",
            put(update_scheduled_activity).delete(remove_scheduled_activity),
        )
}
