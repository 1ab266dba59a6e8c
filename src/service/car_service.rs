use std::sync::Arc;

use crate::constants::{API_NAME, CAR_ALREADY_REGISTERED, CAR_NOT_FOUND};
use crate::error::AppError;
use crate::models::{Car, CarFilter, CarPage, CarPatch, CarWithItems, NewCar};
use crate::repository::CarStore;
use crate::service::Pagination;

#[derive(Clone)]
pub struct CarService {
    store: Arc<dyn CarStore>,
}

impl CarService {
    pub fn new(store: Arc<dyn CarStore>) -> Self {
        Self { store }
    }

    async fn require_car(&self, id: i64) -> Result<Car, AppError> {
        self.store
            .find_car(id)
            .await?
            .ok_or_else(|| AppError::NotFound(CAR_NOT_FOUND.to_string()))
    }

    pub async fn create_car(&self, car: NewCar) -> Result<Car, AppError> {
        tracing::info!("{} Creating car with plate: {}", API_NAME, car.plate);

        let car = self.store.insert_car(&car).await?;

        tracing::info!("{} Successfully created car: {}", API_NAME, car.id);
        Ok(car)
    }

    pub async fn get_car_by_id(&self, id: i64) -> Result<CarWithItems, AppError> {
        let car = self.require_car(id).await?;
        let items = self.store.list_item_names(car.id).await?;
        Ok(CarWithItems { car, items })
    }

    pub async fn list_cars(&self, filter: CarFilter, pagination: Pagination) -> Result<CarPage, AppError> {
        let pagination = pagination.normalize();
        let (count, data) = self
            .store
            .list_cars(&filter, pagination.limit, pagination.offset())
            .await?;

        tracing::debug!(
            "{} Listed {} of {} cars (page {}, limit {})",
            API_NAME,
            data.len(),
            count,
            pagination.page,
            pagination.limit
        );

        Ok(CarPage {
            count,
            pages: pagination.pages_for(count),
            data,
        })
    }

    /// Applies a partial update.
    ///
    /// The plate pre-check gives a friendly conflict before writing; the
    /// store's unique constraint still decides when two updates race.
    pub async fn update_car(&self, id: i64, patch: CarPatch) -> Result<(), AppError> {
        self.require_car(id).await?;

        if let Some(plate) = &patch.plate {
            if let Some(existing) = self.store.find_car_by_plate(plate).await? {
                if existing.id != id {
                    return Err(AppError::Conflict(CAR_ALREADY_REGISTERED.to_string()));
                }
            }
        }

        self.store.update_car(id, &patch).await?;

        tracing::info!("{} Successfully updated car: {}", API_NAME, id);
        Ok(())
    }

    /// Deletes a car and then its items. The two deletes are separate
    /// store calls.
    pub async fn delete_car(&self, id: i64) -> Result<(), AppError> {
        self.require_car(id).await?;

        let removed = self.store.delete_items(id).await?;
        self.store.delete_car(id).await?;

        tracing::info!("{} Deleted car {} and {} item(s)", API_NAME, id, removed);
        Ok(())
    }
}
