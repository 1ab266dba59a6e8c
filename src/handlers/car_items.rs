use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::Json,
    routing::put,
    Router,
};
use serde_json::Value;

use super::parse_car_id;
use crate::app::AppState;
use crate::error::AppError;
use crate::validation::validate_car_items;

pub fn router() -> Router<AppState> {
    Router::new().route("/cars/:id/items", put(update_car_items))
}

async fn update_car_items(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<StatusCode, AppError> {
    // A missing or unreadable body is treated like an empty list.
    let body = payload.map(|Json(body)| body).unwrap_or(Value::Null);
    let names = validate_car_items(&body)?;
    let id = parse_car_id(&id)?;
    state.car_items.update_car_items(id, names).await?;
    Ok(StatusCode::NO_CONTENT)
}
