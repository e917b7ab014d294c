use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post, put},
    Extension, Json, Router,
};

use crate::api::shared::ensure_trip_owner;
use crate::auth::AuthenticatedUser;
use crate::error::{ApiError, ApiResult};
use crate::main_lib::AppState;
use crate::models::CreateShareRequest;
use tripfolio_core::sharing::{NewTripShare, ResolvedShare, SharePermission, TripShare};
use tripfolio_core::trips::{Trip, TripAggregate, TripUpdate};

async fn create_share(
    Extension(user): Extension<AuthenticatedUser>,
    Path(trip_id): Path<String>,
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateShareRequest>,
) -> ApiResult<(StatusCode, Json<TripShare>)> {
    ensure_trip_owner(&state, &user, &trip_id)?;
    let share = state
        .share_service
        .create_share(NewTripShare {
            trip_id,
            permission: payload.permission,
            expires_at: payload.expires_at,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(share)))
}

async fn list_shares(
    Extension(user): Extension<AuthenticatedUser>,
    Path(trip_id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<TripShare>>> {
    ensure_trip_owner(&state, &user, &trip_id)?;
    let shares = state.share_service.list_shares(&trip_id)?;
    Ok(Json(shares))
}

async fn revoke_share(
    Extension(user): Extension<AuthenticatedUser>,
    Path((trip_id, share_id)): Path<(String, String)>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<StatusCode> {
    ensure_trip_owner(&state, &user, &trip_id)?;
    let belongs = state
        .share_service
        .list_shares(&trip_id)?
        .iter()
        .any(|share| share.id == share_id);
    if !belongs {
        return Err(ApiError::NotFound);
    }
    state.share_service.revoke_share(&share_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Public: anyone with the link can view the trip.
async fn resolve_share(
    Path(slug): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<ResolvedShare>> {
    let resolved = state.share_service.resolve(&slug)?;
    Ok(Json(resolved))
}

/// "Copy a shared trip": the authenticated caller becomes the owner of an
/// independent DRAFT copy. Any share permission suffices.
async fn duplicate_shared_trip(
    Extension(user): Extension<AuthenticatedUser>,
    Path(slug): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<(StatusCode, Json<TripAggregate>)> {
    let resolved = state.share_service.resolve(&slug)?;
    let copy = state
        .trip_service
        .duplicate_trip(&resolved.share.trip_id, &user.id)
        .await?;
    Ok((StatusCode::CREATED, Json(copy)))
}

/// The delegated mutation an EDIT share grants: updating the trip's scalars.
async fn update_shared_trip(
    Extension(_user): Extension<AuthenticatedUser>,
    Path(slug): Path<String>,
    State(state): State<Arc<AppState>>,
    Json(payload): Json<TripUpdate>,
) -> ApiResult<Json<Trip>> {
    let resolved = state.share_service.resolve(&slug)?;
    if resolved.share.permission != SharePermission::Edit {
        return Err(ApiError::Forbidden(
            "This share link does not allow editing".to_string(),
        ));
    }
    let trip = state
        .trip_service
        .update_trip(&resolved.share.trip_id, payload)
        .await?;
    Ok(Json(trip))
}

/// Routes that work without authentication.
pub fn public_router() -> Router<Arc<AppState>> {
    Router::new().route("/shared/{slug}", get(resolve_share))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/trips/{trip_id}/shares", get(list_shares).post(create_share))
        .route(
            "/trips/{trip_id}/shares/{share_id}",
            axum::routing::delete(revoke_share),
        )
        .route("/shared/{slug}/duplicate", post(duplicate_shared_trip))
        .route("/shared/{slug}/trip", put(update_shared_trip))
}
