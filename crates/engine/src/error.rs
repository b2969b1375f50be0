//! The module contains the errors the engine can return.
//!
//! The errors are:
//!
//! - [`InvalidAmount`] returned when an amount cannot be parsed or is negative.
//! - [`MissingField`] returned when a required add-item field is empty.
//! - [`UnknownCategory`] / [`UnknownLabel`] returned when a value is outside
//!   the taxonomy of the selected kind.
//! - [`KeyNotFound`] returned when a line item is not in the plan.
//!
//!  [`InvalidAmount`]: EngineError::InvalidAmount
//!  [`MissingField`]: EngineError::MissingField
//!  [`UnknownCategory`]: EngineError::UnknownCategory
//!  [`UnknownLabel`]: EngineError::UnknownLabel
//!  [`KeyNotFound`]: EngineError::KeyNotFound
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Missing field: {0}")]
    MissingField(&'static str),
    #[error("\"{0}\" is not a category of this kind")]
    UnknownCategory(String),
    #[error("\"{label}\" is not an item of \"{category}\"")]
    UnknownLabel { category: String, label: String },
    #[error("Invalid year: {0}")]
    InvalidYear(i32),
    #[error("\"{0}\" key not found!")]
    KeyNotFound(String),
}
