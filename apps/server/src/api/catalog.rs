use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::error::{ApiError, ApiResult};
use crate::main_lib::AppState;
use tripfolio_core::catalog::{
    Activity, ActivityCategory, ActivitySearchQuery, ActivitySearchResponse, City,
    CitySearchQuery, CitySearchResponse,
};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CityQuery {
    search: Option<String>,
    page: Option<i64>,
    page_size: Option<i64>,
}

// Query-string numbers arrive as strings; costs and ratings are taken as
// floats here and converted, rather than leaning on Decimal's serde.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ActivityQuery {
    city_id: Option<String>,
    category: Option<String>,
    max_cost: Option<f64>,
    min_rating: Option<f64>,
    search: Option<String>,
    page: Option<i64>,
    page_size: Option<i64>,
}

fn to_decimal(value: f64, label: &str) -> ApiResult<Decimal> {
    Decimal::try_from(value)
        .map_err(|_| ApiError::BadRequest(format!("Invalid {} value: {}", label, value)))
}

async fn search_cities(
    Query(query): Query<CityQuery>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<CitySearchResponse>> {
    let response = state.catalog_service.search_cities(CitySearchQuery {
        search: query.search,
        page: query.page,
        page_size: query.page_size,
    })?;
    Ok(Json(response))
}

async fn get_city(
    Path(city_id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<City>> {
    let city = state.catalog_service.get_city(&city_id)?;
    Ok(Json(city))
}

async fn search_activities(
    Query(query): Query<ActivityQuery>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<ActivitySearchResponse>> {
    let category = query
        .category
        .as_deref()
        .map(ActivityCategory::parse_str)
        .transpose()?;
    let max_cost = query
        .max_cost
        .map(|value| to_decimal(value, "maxCost"))
        .transpose()?;
    let min_rating = query
        .min_rating
        .map(|value| to_decimal(value, "minRating"))
        .transpose()?;

    let response = state
        .catalog_service
        .search_activities(ActivitySearchQuery {
            city_id: query.city_id,
            category,
            max_cost,
            min_rating,
            search: query.search,
            page: query.page,
            page_size: query.page_size,
        })?;
    Ok(Json(response))
}

async fn get_activity(
    Path(activity_id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Activity>> {
    let activity = state.catalog_service.get_activity(&activity_id)?;
    Ok(Json(activity))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/cities", get(search_cities))
        .route("/cities/{city_id}", get(get_city))
        .route("/activities", get(search_activities))
        .route("/activities/{activity_id}", get(get_activity))
}
