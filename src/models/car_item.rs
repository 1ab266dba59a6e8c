use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct CarItem {
    pub id: i64,
    pub name: String,
    pub car_id: i64,
    pub created_at: DateTime<Utc>,
}
