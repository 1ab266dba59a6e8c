use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Plate '{plate}' is already registered")]
    DuplicatePlate { plate: String },

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

impl StoreError {
    pub fn duplicate_plate(plate: impl Into<String>) -> Self {
        Self::DuplicatePlate {
            plate: plate.into(),
        }
    }
}
