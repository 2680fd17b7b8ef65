use thiserror::Error;

/// Top-level error for every fallible core operation
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Calculation error: {0}")]
    Calculation(#[from] CalculationError),
}

/// Raised before any computation runs; no partial projection is ever produced
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Field {field} is not a finite number: '{value}'")]
    InvalidNumber { field: &'static str, value: String },

    #[error("Field {field} is out of range: {reason}")]
    OutOfRange { field: &'static str, reason: String },

    #[error("Invalid milestone table: {0}")]
    InvalidMilestones(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum CalculationError {
    #[error("Month {month}: {field} is not a finite value")]
    NonFinite { month: u32, field: &'static str },

    #[error("Month {month}: {field} exceeds the representable range")]
    Overflow { month: u32, field: &'static str },
}

pub type Result<T> = std::result::Result<T, Error>;
