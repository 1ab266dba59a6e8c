use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use serde::Deserialize;

use super::parse_car_id;
use crate::app::AppState;
use crate::constants::API_NAME;
use crate::error::AppError;
use crate::models::{Car, CarFilter, CarPage, CarPayload, CarWithItems};
use crate::service::Pagination;
use crate::validation::{validate_car_create, validate_car_update};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/cars", get(list_cars).post(create_car))
        .route("/cars/:id", get(get_car).patch(update_car).delete(delete_car))
}

/// Raw listing query. Values are kept as strings and parsed leniently.
#[derive(Debug, Default, Deserialize)]
pub struct ListCarsQuery {
    pub year: Option<String>,
    pub final_plate: Option<String>,
    pub brand: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
}

impl ListCarsQuery {
    pub fn filter(&self) -> CarFilter {
        fn present(value: &Option<String>) -> Option<String> {
            value.as_ref().filter(|v| !v.is_empty()).cloned()
        }

        CarFilter {
            year: self.year.as_deref().and_then(|y| y.trim().parse().ok()),
            final_plate: present(&self.final_plate),
            brand: present(&self.brand),
        }
    }

    pub fn pagination(&self) -> Pagination {
        Pagination::from_query(self.page.as_deref(), self.limit.as_deref())
    }
}

/// Unwraps a JSON body. A request without a JSON body reads as an empty
/// object so the validators report what is missing.
fn json_body<T: Default>(payload: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    match payload {
        Ok(Json(body)) => Ok(body),
        Err(JsonRejection::MissingJsonContentType(_)) => Ok(T::default()),
        Err(rejection) => Err(AppError::Validation(vec![rejection.body_text()])),
    }
}

async fn list_cars(
    State(state): State<AppState>,
    query: Result<Query<ListCarsQuery>, QueryRejection>,
) -> Result<Json<CarPage>, AppError> {
    // An undecodable query string lists without filters.
    let query = match query {
        Ok(Query(query)) => query,
        Err(rejection) => {
            tracing::debug!("{} Ignoring query string: {}", API_NAME, rejection.body_text());
            ListCarsQuery::default()
        }
    };
    let page = state.cars.list_cars(query.filter(), query.pagination()).await?;
    Ok(Json(page))
}

async fn get_car(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<CarWithItems>, AppError> {
    let id = parse_car_id(&id)?;
    Ok(Json(state.cars.get_car_by_id(id).await?))
}

async fn create_car(
    State(state): State<AppState>,
    payload: Result<Json<CarPayload>, JsonRejection>,
) -> Result<(StatusCode, Json<Car>), AppError> {
    let new_car = validate_car_create(&json_body(payload)?)?;
    let car = state.cars.create_car(new_car).await?;
    Ok((StatusCode::CREATED, Json(car)))
}

async fn update_car(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<CarPayload>, JsonRejection>,
) -> Result<StatusCode, AppError> {
    let patch = validate_car_update(&json_body(payload)?)?;
    let id = parse_car_id(&id)?;
    state.cars.update_car(id, patch).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn delete_car(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let id = parse_car_id(&id)?;
    state.cars.delete_car(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(pairs: &[(&str, &str)]) -> ListCarsQuery {
        let mut q = ListCarsQuery::default();
        for (key, value) in pairs {
            let value = Some(value.to_string());
            match *key {
                "year" => q.year = value,
                "final_plate" => q.final_plate = value,
                "brand" => q.brand = value,
                "page" => q.page = value,
                "limit" => q.limit = value,
                _ => unreachable!(),
            }
        }
        q
    }

    #[test]
    fn empty_values_do_not_become_filters() {
        let q = query(&[("year", ""), ("final_plate", ""), ("brand", "")]);
        assert_eq!(q.filter(), CarFilter::default());
    }

    #[test]
    fn filters_are_parsed_from_query() {
        let q = query(&[("year", "2020"), ("final_plate", "23"), ("brand", "Toy")]);
        assert_eq!(
            q.filter(),
            CarFilter {
                year: Some(2020),
                final_plate: Some("23".to_string()),
                brand: Some("Toy".to_string()),
            }
        );
        assert_eq!(query(&[("year", "soon")]).filter().year, None);
    }

    #[test]
    fn pagination_comes_from_page_and_limit() {
        assert_eq!(
            query(&[("page", "0"), ("limit", "20")]).pagination(),
            Pagination { page: 1, limit: 10 }
        );
    }
}
