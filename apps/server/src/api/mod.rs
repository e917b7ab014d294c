//! HTTP API: routers, layers, and the OpenAPI document.

mod ai;
mod auth_routes;
mod budget;
mod catalog;
mod health;
mod itinerary;
mod shared;
mod shares;
mod trips;

use std::sync::Arc;

use axum::{
    http::HeaderValue,
    middleware,
    routing::get,
    Json, Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use utoipa::OpenApi;

use crate::auth::auth_middleware;
use crate::config::Config;
use crate::main_lib::AppState;
use crate::models::{LoginRequest, LoginResponse, RegisterRequest, UserProfile};

#[derive(OpenApi)]
#[openapi(
    paths(
        health::healthz,
        health::readyz,
        auth_routes::register,
        auth_routes::login,
        auth_routes::me,
    ),
    components(schemas(UserProfile, RegisterRequest, LoginRequest, LoginResponse)),
    info(
        title = "Tripfolio API",
        description = "Trip planning: itineraries, budgets, sharing, AI suggestions"
    )
)]
struct ApiDoc;

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

fn cors_layer(config: &Config) -> CorsLayer {
    if config.cors_allow.iter().any(|origin| origin == "*") {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<HeaderValue> = config
            .cors_allow
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    }
}

pub fn app_router(state: Arc<AppState>, config: &Config) -> Router {
    let public = Router::new()
        .route("/healthz", get(health::healthz))
        .route("/readyz", get(health::readyz))
        .route("/openapi.json", get(openapi_json))
        .merge(auth_routes::public_router())
        .merge(shares::public_router());

    let protected = Router::new()
        .merge(auth_routes::protected_router())
        .merge(trips::router())
        .merge(itinerary::router())
        .merge(catalog::router())
        .merge(budget::router())
        .merge(shares::router())
        .merge(ai::router())
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    Router::new()
        .nest("/api/v1", public.merge(protected))
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TimeoutLayer::new(config.request_timeout))
        .layer(cors_layer(config))
        .with_state(state)
}
