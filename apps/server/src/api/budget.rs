use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Extension, Json, Router,
};

use crate::api::shared::ensure_trip_owner;
use crate::auth::AuthenticatedUser;
use crate::error::ApiResult;
use crate::main_lib::AppState;
use crate::models::RecordSpendRequest;
use tripfolio_core::budget::{
    AllocationInput, AllocationPatch, BudgetAllocation, BudgetCategory, BudgetSummary,
};

async fn get_budget_summary(
    Extension(user): Extension<AuthenticatedUser>,
    Path(trip_id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<BudgetSummary>> {
    ensure_trip_owner(&state, &user, &trip_id)?;
    let summary = state.budget_service.get_budget_summary(&trip_id)?;
    Ok(Json(summary))
}

async fn get_allocations(
    Extension(user): Extension<AuthenticatedUser>,
    Path(trip_id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<BudgetAllocation>>> {
    ensure_trip_owner(&state, &user, &trip_id)?;
    let allocations = state.budget_service.get_allocations(&trip_id)?;
    Ok(Json(allocations))
}

async fn set_allocations(
    Extension(user): Extension<AuthenticatedUser>,
    Path(trip_id): Path<String>,
    State(state): State<Arc<AppState>>,
    Json(payload): Json<Vec<AllocationInput>>,
) -> ApiResult<Json<Vec<BudgetAllocation>>> {
    ensure_trip_owner(&state, &user, &trip_id)?;
    let allocations = state
        .budget_service
        .set_allocations(&trip_id, payload)
        .await?;
    Ok(Json(allocations))
}

async fn patch_allocation(
    Extension(user): Extension<AuthenticatedUser>,
    Path((trip_id, category)): Path<(String, String)>,
    State(state): State<Arc<AppState>>,
    Json(payload): Json<AllocationPatch>,
) -> ApiResult<Json<BudgetAllocation>> {
    ensure_trip_owner(&state, &user, &trip_id)?;
    let category = BudgetCategory::parse_str(&category)?;
    let allocation = state
        .budget_service
        .patch_allocation(&trip_id, category, payload)
        .await?;
    Ok(Json(allocation))
}

async fn delete_allocation(
    Extension(user): Extension<AuthenticatedUser>,
    Path((trip_id, category)): Path<(String, String)>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<StatusCode> {
    ensure_trip_owner(&state, &user, &trip_id)?;
    let category = BudgetCategory::parse_str(&category)?;
    state
        .budget_service
        .delete_allocation(&trip_id, category)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn record_spend(
    Extension(user): Extension<AuthenticatedUser>,
    Path(trip_id): Path<String>,
    State(state): State<Arc<AppState>>,
    Json(payload): Json<RecordSpendRequest>,
) -> ApiResult<Json<BudgetAllocation>> {
    ensure_trip_owner(&state, &user, &trip_id)?;
    let allocation = state
        .budget_service
        .record_spend(&trip_id, payload.category, payload.amount)
        .await?;
    Ok(Json(allocation))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/trips/{trip_id}/budget", get(get_budget_summary))
        .route(
            "/trips/{trip_id}/budget/allocations",
            get(get_allocations).put(set_allocations),
        )
        .route(
            "/trips/{trip_id}/budget/allocations/{category}",
            axum::routing::patch(patch_allocation).delete(delete_allocation),
        )
        .route("/trips/{trip_id}/budget/spend", post(record_spend))
}
