use thiserror::Error;

pub type CsvResult<T> = Result<T, CsvError>;

#[derive(Error, Debug)]
pub enum CsvError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Schema validation error: {0}")]
    SchemaValidation(String),

    #[error("Invalid pubkey: {0}")]
    InvalidPubkey(String),

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Inconsistent allocation data: {0}")]
    DataInconsistency(String),
}
