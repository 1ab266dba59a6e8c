//! In-memory implementation of [`CarStore`] for tests and local development.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::{CarStore, StoreError};
use crate::models::{Car, CarFilter, CarItem, CarPatch, NewCar};

#[derive(Default)]
struct Tables {
    cars: BTreeMap<i64, Car>,
    items: Vec<CarItem>,
    next_car_id: i64,
    next_item_id: i64,
}

impl Tables {
    fn plate_taken(&self, plate: &str, except: Option<i64>) -> bool {
        self.cars
            .values()
            .any(|car| car.plate == plate && Some(car.id) != except)
    }
}

/// Keeps both tables behind a single lock, so item replacement is atomic
/// and plate uniqueness is checked under the same write guard as the insert.
#[derive(Clone, Default)]
pub struct InMemoryCarStore {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryCarStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Tables>, StoreError> {
        self.tables
            .read()
            .map_err(|e| StoreError::Unavailable(format!("Failed to acquire read lock: {}", e)))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Tables>, StoreError> {
        self.tables
            .write()
            .map_err(|e| StoreError::Unavailable(format!("Failed to acquire write lock: {}", e)))
    }
}

#[async_trait]
impl CarStore for InMemoryCarStore {
    async fn insert_car(&self, car: &NewCar) -> Result<Car, StoreError> {
        let mut tables = self.write()?;
        if tables.plate_taken(&car.plate, None) {
            return Err(StoreError::duplicate_plate(&car.plate));
        }

        tables.next_car_id += 1;
        let car = Car {
            id: tables.next_car_id,
            brand: car.brand.clone(),
            model: car.model.clone(),
            plate: car.plate.clone(),
            year: car.year,
            created_at: Utc::now(),
        };
        tables.cars.insert(car.id, car.clone());
        Ok(car)
    }

    async fn find_car(&self, id: i64) -> Result<Option<Car>, StoreError> {
        Ok(self.read()?.cars.get(&id).cloned())
    }

    async fn find_car_by_plate(&self, plate: &str) -> Result<Option<Car>, StoreError> {
        Ok(self
            .read()?
            .cars
            .values()
            .find(|car| car.plate == plate)
            .cloned())
    }

    async fn list_cars(
        &self,
        filter: &CarFilter,
        limit: u32,
        offset: u64,
    ) -> Result<(i64, Vec<Car>), StoreError> {
        let tables = self.read()?;
        let mut matching: Vec<&Car> = tables.cars.values().filter(|car| filter.matches(car)).collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));

        let count = matching.len() as i64;
        let page = matching
            .into_iter()
            .skip(usize::try_from(offset).unwrap_or(usize::MAX))
            .take(limit as usize)
            .cloned()
            .collect();
        Ok((count, page))
    }

    async fn update_car(&self, id: i64, patch: &CarPatch) -> Result<(), StoreError> {
        let mut tables = self.write()?;
        if let Some(plate) = &patch.plate {
            if tables.plate_taken(plate, Some(id)) {
                return Err(StoreError::duplicate_plate(plate));
            }
        }
        if let Some(car) = tables.cars.get_mut(&id) {
            patch.apply_to(car);
        }
        Ok(())
    }

    async fn delete_car(&self, id: i64) -> Result<(), StoreError> {
        self.write()?.cars.remove(&id);
        Ok(())
    }

    async fn list_item_names(&self, car_id: i64) -> Result<Vec<String>, StoreError> {
        Ok(self
            .read()?
            .items
            .iter()
            .filter(|item| item.car_id == car_id)
            .map(|item| item.name.clone())
            .collect())
    }

    async fn delete_items(&self, car_id: i64) -> Result<u64, StoreError> {
        let mut tables = self.write()?;
        let before = tables.items.len();
        tables.items.retain(|item| item.car_id != car_id);
        Ok((before - tables.items.len()) as u64)
    }

    async fn replace_items(&self, car_id: i64, names: &[String]) -> Result<(), StoreError> {
        let mut tables = self.write()?;
        tables.items.retain(|item| item.car_id != car_id);

        let now = Utc::now();
        for name in names {
            tables.next_item_id += 1;
            let item = CarItem {
                id: tables.next_item_id,
                name: name.clone(),
                car_id,
                created_at: now,
            };
            tables.items.push(item);
        }
        Ok(())
    }
}
