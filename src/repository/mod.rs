pub mod car_repo;
pub mod errors;
pub mod in_memory;

pub use car_repo::PgCarStore;
pub use errors::StoreError;
pub use in_memory::InMemoryCarStore;

use async_trait::async_trait;

use crate::models::{Car, CarFilter, CarPatch, NewCar};

/// Persistence for cars and their items.
///
/// Services hold an `Arc<dyn CarStore>` so the backing store is chosen at
/// startup and can be swapped for [`InMemoryCarStore`] in tests.
#[async_trait]
pub trait CarStore: Send + Sync {
    /// Inserts a car. A plate collision yields [`StoreError::DuplicatePlate`].
    async fn insert_car(&self, car: &NewCar) -> Result<Car, StoreError>;

    async fn find_car(&self, id: i64) -> Result<Option<Car>, StoreError>;

    async fn find_car_by_plate(&self, plate: &str) -> Result<Option<Car>, StoreError>;

    /// Returns the total number of matching cars and the requested slice,
    /// newest first.
    async fn list_cars(
        &self,
        filter: &CarFilter,
        limit: u32,
        offset: u64,
    ) -> Result<(i64, Vec<Car>), StoreError>;

    async fn update_car(&self, id: i64, patch: &CarPatch) -> Result<(), StoreError>;

    async fn delete_car(&self, id: i64) -> Result<(), StoreError>;

    /// Item names of a car in storage order.
    async fn list_item_names(&self, car_id: i64) -> Result<Vec<String>, StoreError>;

    async fn delete_items(&self, car_id: i64) -> Result<u64, StoreError>;

    /// Replaces every item of a car in one unit of work.
    async fn replace_items(&self, car_id: i64, names: &[String]) -> Result<(), StoreError>;
}
