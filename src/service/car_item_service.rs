use std::sync::Arc;

use crate::constants::{API_NAME, CAR_NOT_FOUND};
use crate::error::AppError;
use crate::repository::CarStore;

#[derive(Clone)]
pub struct CarItemService {
    store: Arc<dyn CarStore>,
}

impl CarItemService {
    pub fn new(store: Arc<dyn CarStore>) -> Self {
        Self { store }
    }

    /// Replaces every item of a car with `names`.
    pub async fn update_car_items(&self, car_id: i64, names: Vec<String>) -> Result<(), AppError> {
        if self.store.find_car(car_id).await?.is_none() {
            return Err(AppError::NotFound(CAR_NOT_FOUND.to_string()));
        }

        self.store.replace_items(car_id, &names).await?;

        tracing::info!("{} Replaced items of car {} with {} item(s)", API_NAME, car_id, names.len());
        Ok(())
    }
}
