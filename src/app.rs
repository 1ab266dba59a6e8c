use std::any::Any;
use std::sync::Arc;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    Router,
};
use serde_json::json;
use tower_http::{catch_panic::CatchPanicLayer, cors::CorsLayer, trace::TraceLayer};

use crate::constants::{API_NAME, INTERNAL_SERVER_ERROR};
use crate::handlers::{car_items, cars, health};
use crate::repository::CarStore;
use crate::service::{CarItemService, CarService};

pub const API_PREFIX: &str = "/api/v1";

#[derive(Clone)]
pub struct AppState {
    pub cars: CarService,
    pub car_items: CarItemService,
}

impl AppState {
    pub fn new(store: Arc<dyn CarStore>) -> Self {
        Self {
            cars: CarService::new(store.clone()),
            car_items: CarItemService::new(store),
        }
    }
}

/// Builds the full application router on top of `store`.
pub fn build_router(store: Arc<dyn CarStore>) -> Router {
    let api = Router::new()
        .merge(cars::router())
        .merge(car_items::router())
        .merge(health::router());

    Router::new()
        .nest(API_PREFIX, api)
        .fallback(route_not_found)
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(AppState::new(store))
}

async fn route_not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "errors": ["route not found"] })),
    )
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s
    } else {
        "unknown panic"
    };
    tracing::error!("{} Handler panicked: {}", API_NAME, detail);

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "errors": [INTERNAL_SERVER_ERROR] })),
    )
        .into_response()
}
