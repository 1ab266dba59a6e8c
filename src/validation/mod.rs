//! Request payload validators.
//!
//! Validators are pure: they never touch the store, and they return the
//! typed value the services work with once every check has passed.

mod car;
mod car_items;

pub use car::{validate_car_create, validate_car_update, validate_plate, YearWindow};
pub use car_items::validate_car_items;

use thiserror::Error;

/// All messages produced by a failed validation, in check order.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("validation failed: {}", .errors.join(", "))]
pub struct ValidationErrors {
    pub errors: Vec<String>,
}

impl ValidationErrors {
    pub fn new(errors: Vec<String>) -> Self {
        Self { errors }
    }

    pub(crate) fn check(errors: Vec<String>) -> Result<(), Self> {
        if errors.is_empty() {
            Ok(())
        } else {
            Err(Self::new(errors))
        }
    }
}
