pub mod car_items;
pub mod cars;
pub mod health;

use crate::error::AppError;
use crate::constants::CAR_NOT_FOUND;

/// Parses a `:id` path segment. Anything that is not an integer cannot
/// name a stored car.
pub(crate) fn parse_car_id(raw: &str) -> Result<i64, AppError> {
    raw.parse()
        .map_err(|_| AppError::NotFound(CAR_NOT_FOUND.to_string()))
}
