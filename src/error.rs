use thiserror::Error;

pub type Result<T> = std::result::Result<T, RegistrationError>;

#[derive(Error, Debug)]
pub enum RegistrationError {
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("Unknown meeting: {0}")]
    UnknownMeeting(u32),
    #[error("Store error: {0}")]
    StoreError(String),
    #[error("Payment gateway error: {0}")]
    GatewayError(String),
    #[error("Validation error: {0}")]
    ValidationError(String),
}
