use thiserror::Error;

#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("no performance records found for financial year {0}")]
    YearNotFound(String),

    #[error("no performance records found for district {district} in {fin_year}")]
    DistrictNotFound { district: String, fin_year: String },

    #[error("invalid financial year label {0}: expected the form 2023-2024")]
    InvalidFinYear(String),

    #[error("record store query failed: {0}")]
    StoreUnavailable(String),

    #[error("serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, DashboardError>;
