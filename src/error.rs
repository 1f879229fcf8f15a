use thiserror::Error;

/// Input validation failures.
///
/// These are fatal to the single computation that raised them. Geometric
/// non-convergence is not an error; it is reported inside the solution.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InputError {
    #[error("{field} must be positive, got {value}")]
    NonPositive { field: &'static str, value: f64 },

    #[error("{field} must not be negative, got {value}")]
    Negative { field: &'static str, value: f64 },

    #[error("{field} {value} exceeds the supported maximum {max}")]
    TooLarge {
        field: &'static str,
        value: f64,
        max: f64,
    },

    #[error("{field} must be a finite number")]
    NonFinite { field: &'static str },

    #[error("{segment} SD {value} is outside the supported range [{min}, {max}]")]
    SdOutOfRange {
        segment: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("measured {segment} length {value} m is not a positive finite length")]
    InvalidMeasurement { segment: &'static str, value: f64 },

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl From<serde_json::Error> for InputError {
    fn from(err: serde_json::Error) -> Self {
        InputError::Config(err.to_string())
    }
}

/// Reject non-finite and non-positive values for a named field.
pub fn require_positive(field: &'static str, value: f64) -> Result<f64, InputError> {
    if !value.is_finite() {
        return Err(InputError::NonFinite { field });
    }
    if value <= 0.0 {
        return Err(InputError::NonPositive { field, value });
    }
    Ok(value)
}

/// Reject non-finite and negative values for a named field.
pub fn require_non_negative(field: &'static str, value: f64) -> Result<f64, InputError> {
    if !value.is_finite() {
        return Err(InputError::NonFinite { field });
    }
    if value < 0.0 {
        return Err(InputError::Negative { field, value });
    }
    Ok(value)
}
