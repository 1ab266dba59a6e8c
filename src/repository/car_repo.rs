use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};

use super::{CarStore, StoreError};
use crate::models::{Car, CarFilter, CarPatch, NewCar};

const CAR_COLUMNS: &str = "id, brand, model, plate, year, created_at";

#[derive(Clone)]
pub struct PgCarStore {
    pool: PgPool,
}

impl PgCarStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Maps a unique-constraint violation on `plate` to [`StoreError::DuplicatePlate`].
    fn map_write_error(err: sqlx::Error, plate: Option<&str>) -> StoreError {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.code().as_deref() == Some("23505") {
                return StoreError::duplicate_plate(plate.unwrap_or_default());
            }
        }
        StoreError::Database(err)
    }

    fn push_filter<'a>(builder: &mut QueryBuilder<'a, Postgres>, filter: &CarFilter) {
        let mut keyword = " WHERE ";
        if let Some(year) = filter.year {
            builder.push(keyword).push("year >= ").push_bind(year);
            keyword = " AND ";
        }
        if let Some(suffix) = &filter.final_plate {
            builder
                .push(keyword)
                .push("right(plate, char_length(")
                .push_bind(suffix.clone())
                .push(")) = ")
                .push_bind(suffix.clone());
            keyword = " AND ";
        }
        if let Some(brand) = &filter.brand {
            builder
                .push(keyword)
                .push("strpos(brand, ")
                .push_bind(brand.clone())
                .push(") > 0");
        }
    }
}

#[async_trait]
impl CarStore for PgCarStore {
    async fn insert_car(&self, car: &NewCar) -> Result<Car, StoreError> {
        let query = format!(
            "INSERT INTO cars (brand, model, plate, year) VALUES ($1, $2, $3, $4) RETURNING {CAR_COLUMNS}"
        );
        sqlx::query_as::<_, Car>(&query)
            .bind(&car.brand)
            .bind(&car.model)
            .bind(&car.plate)
            .bind(car.year)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| Self::map_write_error(e, Some(&car.plate)))
    }

    async fn find_car(&self, id: i64) -> Result<Option<Car>, StoreError> {
        let query = format!("SELECT {CAR_COLUMNS} FROM cars WHERE id = $1");
        Ok(sqlx::query_as::<_, Car>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn find_car_by_plate(&self, plate: &str) -> Result<Option<Car>, StoreError> {
        let query = format!("SELECT {CAR_COLUMNS} FROM cars WHERE plate = $1");
        Ok(sqlx::query_as::<_, Car>(&query)
            .bind(plate)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn list_cars(
        &self,
        filter: &CarFilter,
        limit: u32,
        offset: u64,
    ) -> Result<(i64, Vec<Car>), StoreError> {
        let mut count_query = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM cars");
        Self::push_filter(&mut count_query, filter);
        let count: i64 = count_query
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await?;

        let mut page_query = QueryBuilder::<Postgres>::new(format!("SELECT {CAR_COLUMNS} FROM cars"));
        Self::push_filter(&mut page_query, filter);
        page_query
            .push(" ORDER BY created_at DESC, id DESC LIMIT ")
            .push_bind(i64::from(limit))
            .push(" OFFSET ")
            .push_bind(i64::try_from(offset).unwrap_or(i64::MAX));
        let cars = page_query
            .build_query_as::<Car>()
            .fetch_all(&self.pool)
            .await?;

        Ok((count, cars))
    }

    async fn update_car(&self, id: i64, patch: &CarPatch) -> Result<(), StoreError> {
        if patch.is_empty() {
            return Ok(());
        }

        let mut builder = QueryBuilder::<Postgres>::new("UPDATE cars SET ");
        {
            let mut assignments = builder.separated(", ");
            if let Some(brand) = &patch.brand {
                assignments.push("brand = ").push_bind_unseparated(brand.clone());
            }
            if let Some(model) = &patch.model {
                assignments.push("model = ").push_bind_unseparated(model.clone());
            }
            if let Some(year) = patch.year {
                assignments.push("year = ").push_bind_unseparated(year);
            }
            if let Some(plate) = &patch.plate {
                assignments.push("plate = ").push_bind_unseparated(plate.clone());
            }
        }
        builder.push(" WHERE id = ").push_bind(id);

        builder
            .build()
            .execute(&self.pool)
            .await
            .map_err(|e| Self::map_write_error(e, patch.plate.as_deref()))?;
        Ok(())
    }

    async fn delete_car(&self, id: i64) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM cars WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn list_item_names(&self, car_id: i64) -> Result<Vec<String>, StoreError> {
        Ok(sqlx::query_scalar::<_, String>(
            "SELECT name FROM cars_items WHERE car_id = $1 ORDER BY id",
        )
        .bind(car_id)
        .fetch_all(&self.pool)
        .await?)
    }

    async fn delete_items(&self, car_id: i64) -> Result<u64, StoreError> {
        let result = sqlx::query("DELETE FROM cars_items WHERE car_id = $1")
            .bind(car_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    async fn replace_items(&self, car_id: i64, names: &[String]) -> Result<(), StoreError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM cars_items WHERE car_id = $1")
            .bind(car_id)
            .execute(&mut *tx)
            .await?;

        if !names.is_empty() {
            let mut builder = QueryBuilder::<Postgres>::new("INSERT INTO cars_items (name, car_id) ");
            builder.push_values(names, |mut row, name| {
                row.push_bind(name.clone()).push_bind(car_id);
            });
            builder.build().execute(&mut *tx).await?;
        }

        tx.commit().await?;
        Ok(())
    }
}
