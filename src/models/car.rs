use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A stored vehicle record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Car {
    pub id: i64,
    pub brand: String,
    pub model: String,
    pub plate: String,
    pub year: i32,
    pub created_at: DateTime<Utc>,
}

/// Raw request body for creating or patching a car.
///
/// Every field is optional so that missing and `null` values reach the
/// validators instead of failing deserialization.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CarPayload {
    pub brand: Option<String>,
    pub model: Option<String>,
    pub year: Option<i32>,
    pub plate: Option<String>,
}

impl CarPayload {
    /// Drops empty strings and a zero year so they count as absent.
    pub fn normalized(self) -> Self {
        fn present(value: Option<String>) -> Option<String> {
            value.filter(|v| !v.is_empty())
        }

        Self {
            brand: present(self.brand),
            model: present(self.model),
            year: self.year.filter(|year| *year != 0),
            plate: present(self.plate),
        }
    }
}

/// A validated car, ready to be inserted.
#[derive(Debug, Clone, PartialEq)]
pub struct NewCar {
    pub brand: String,
    pub model: String,
    pub year: i32,
    pub plate: String,
}

/// A validated partial update. `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CarPatch {
    pub brand: Option<String>,
    pub model: Option<String>,
    pub year: Option<i32>,
    pub plate: Option<String>,
}

impl CarPatch {
    pub fn is_empty(&self) -> bool {
        self.brand.is_none() && self.model.is_none() && self.year.is_none() && self.plate.is_none()
    }

    pub fn apply_to(&self, car: &mut Car) {
        if let Some(brand) = &self.brand {
            car.brand = brand.clone();
        }
        if let Some(model) = &self.model {
            car.model = model.clone();
        }
        if let Some(year) = self.year {
            car.year = year;
        }
        if let Some(plate) = &self.plate {
            car.plate = plate.clone();
        }
    }
}

/// A car together with the names of its items, in storage order.
#[derive(Debug, Clone, Serialize)]
pub struct CarWithItems {
    #[serde(flatten)]
    pub car: Car,
    pub items: Vec<String>,
}

/// Listing filters, combined with AND.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CarFilter {
    /// Minimum year, inclusive.
    pub year: Option<i32>,
    /// Required plate suffix.
    pub final_plate: Option<String>,
    /// Case-sensitive substring of the brand.
    pub brand: Option<String>,
}

impl CarFilter {
    pub fn matches(&self, car: &Car) -> bool {
        self.year.map_or(true, |year| car.year >= year)
            && self
                .final_plate
                .as_deref()
                .map_or(true, |suffix| car.plate.ends_with(suffix))
            && self
                .brand
                .as_deref()
                .map_or(true, |brand| car.brand.contains(brand))
    }
}

/// One page of a car listing.
#[derive(Debug, Clone, Serialize)]
pub struct CarPage {
    pub count: i64,
    pub pages: i64,
    pub data: Vec<Car>,
}
