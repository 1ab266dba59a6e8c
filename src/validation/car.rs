use chrono::{Datelike, Utc};
use once_cell::sync::Lazy;
use regex::Regex;

use super::ValidationErrors;
use crate::models::{CarPatch, CarPayload, NewCar};

static PLATE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z]{3}-[0-9][A-J0-9][0-9]{2}$").expect("plate regex is valid"));

const PLATE_FORMAT_MESSAGE: &str = "plate must be in the correct format ABC-1C34";

/// Accepted model years: the ten years up to and including next year.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearWindow {
    pub min: i32,
    pub max: i32,
}

impl YearWindow {
    pub fn for_current_year(current_year: i32) -> Self {
        let next_year = current_year + 1;
        Self {
            min: next_year - 10,
            max: next_year,
        }
    }

    pub fn current() -> Self {
        Self::for_current_year(Utc::now().year())
    }

    pub fn contains(&self, year: i32) -> bool {
        (self.min..=self.max).contains(&year)
    }

    fn message(&self) -> String {
        format!("year must be between {} and {}", self.min, self.max)
    }
}

pub fn validate_plate(plate: &str) -> bool {
    PLATE_REGEX.is_match(plate)
}

fn check_year(year: i32, errors: &mut Vec<String>) {
    let window = YearWindow::current();
    if !window.contains(year) {
        errors.push(window.message());
    }
}

fn check_plate(plate: &str, errors: &mut Vec<String>) {
    if !validate_plate(plate) {
        errors.push(PLATE_FORMAT_MESSAGE.to_string());
    }
}

/// Validates a create payload.
///
/// Missing fields are reported together and stop validation there; range
/// and format checks only run on a complete payload.
pub fn validate_car_create(payload: &CarPayload) -> Result<NewCar, ValidationErrors> {
    let payload = payload.clone().normalized();
    let (brand, model, year, plate) = match (payload.brand, payload.model, payload.year, payload.plate) {
        (Some(brand), Some(model), Some(year), Some(plate)) => (brand, model, year, plate),
        (brand, model, year, plate) => {
            let missing = [
                (brand.is_none(), "brand is required"),
                (model.is_none(), "model is required"),
                (year.is_none(), "year is required"),
                (plate.is_none(), "plate is required"),
            ];
            return Err(ValidationErrors::new(
                missing
                    .iter()
                    .filter(|(absent, _)| *absent)
                    .map(|(_, message)| message.to_string())
                    .collect(),
            ));
        }
    };

    let mut errors = Vec::new();
    check_year(year, &mut errors);
    check_plate(&plate, &mut errors);
    ValidationErrors::check(errors)?;

    Ok(NewCar {
        brand,
        model,
        year,
        plate,
    })
}

/// Validates a partial update. Empty strings and nulls count as absent.
pub fn validate_car_update(payload: &CarPayload) -> Result<CarPatch, ValidationErrors> {
    let payload = payload.clone().normalized();
    let mut errors = Vec::new();

    if payload.brand.is_some() && payload.model.is_none() {
        errors.push("model must also be informed".to_string());
    }
    if let Some(year) = payload.year {
        check_year(year, &mut errors);
    }
    if let Some(plate) = &payload.plate {
        check_plate(plate, &mut errors);
    }
    ValidationErrors::check(errors)?;

    Ok(CarPatch {
        brand: payload.brand,
        model: payload.model,
        year: payload.year,
        plate: payload.plate,
    })
}
