//! Error types for vehicle input

use thiserror::Error;

/// A vehicle field that failed validation at the form boundary.
///
/// The engine itself never fails; everything that can go wrong with a
/// valuation is caught here, before a `VehicleInput` exists.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("{field} is required")]
    Missing { field: &'static str },

    #[error("{field}: '{value}' is not one of: {expected}")]
    InvalidChoice {
        field: &'static str,
        value: String,
        expected: String,
    },

    #[error("{field}: {value} is outside the allowed range {min}..={max}")]
    OutOfRange {
        field: &'static str,
        value: i64,
        min: i64,
        max: i64,
    },
}

impl InputError {
    /// Name of the offending field
    pub fn field(&self) -> &'static str {
        match self {
            InputError::Missing { field }
            | InputError::InvalidChoice { field, .. }
            | InputError::OutOfRange { field, .. } => field,
        }
    }
}
