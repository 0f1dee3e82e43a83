//! # Error Types
//!
//! Structured error types for rc_core. Every entry point validates its inputs
//! before doing any math and reports violations through [`CalcError`], so a
//! caller (CLI, UI, or another service) can tell exactly which field to fix.
//!
//! Physical infeasibility inside the serviceability solve is *not* an error
//! in this sense; it is reported as a tagged value (see
//! [`crate::calculations::sls::SlsOutcome`]).
//!
//! ## Example
//!
//! ```rust
//! use rc_core::errors::{CalcError, CalcResult};
//!
//! fn validate_breadth(breadth_mm: f64) -> CalcResult<()> {
//!     if breadth_mm <= 0.0 {
//!         return Err(CalcError::invalid_input(
//!             "breadth_mm",
//!             breadth_mm.to_string(),
//!             "Breadth must be positive",
//!         ));
//!     }
//!     Ok(())
//! }
//!
//! assert!(validate_breadth(-10.0).is_err());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for rc_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for calculation operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// An input value is invalid (out of range, non-positive, etc.)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// A required field is missing
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    /// Material grade not found in the grade table
    #[error("Material not found: {material_name}")]
    MaterialNotFound { material_name: String },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },
}

impl CalcError {
    /// Create an InvalidInput error
    pub fn invalid_input(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        CalcError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a MissingField error
    pub fn missing_field(field: impl Into<String>) -> Self {
        CalcError::MissingField {
            field: field.into(),
        }
    }

    /// Create a MaterialNotFound error
    pub fn material_not_found(material_name: impl Into<String>) -> Self {
        CalcError::MaterialNotFound {
            material_name: material_name.into(),
        }
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::MissingField { .. } => "MISSING_FIELD",
            CalcError::MaterialNotFound { .. } => "MATERIAL_NOT_FOUND",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
        }
    }
}

impl From<serde_json::Error> for CalcError {
    fn from(err: serde_json::Error) -> Self {
        CalcError::SerializationError {
            reason: err.to_string(),
        }
    }
}

/// Reject a value that must be strictly positive and finite.
pub(crate) fn require_positive(field: &str, value: f64) -> CalcResult<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(CalcError::invalid_input(
            field,
            value.to_string(),
            "Must be a positive number",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = CalcError::invalid_input("breadth_mm", "-5.0", "Breadth must be positive");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"type\":\"InvalidInput\""));
        let roundtrip: CalcError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(CalcError::missing_field("test").error_code(), "MISSING_FIELD");
        assert_eq!(CalcError::material_not_found("C90").error_code(), "MATERIAL_NOT_FOUND");
        assert_eq!(
            CalcError::invalid_input("fc_mpa", "-30", "Must be a positive number").error_code(),
            "INVALID_INPUT"
        );
    }

    #[test]
    fn test_require_positive() {
        assert!(require_positive("fc", 30.0).is_ok());
        assert!(require_positive("fc", 0.0).is_err());
        assert!(require_positive("fc", f64::NAN).is_err());
        match require_positive("cover_mm", -1.0) {
            Err(CalcError::InvalidInput { field, .. }) => assert_eq!(field, "cover_mm"),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_from_serde_error() {
        let err: CalcError = serde_json::from_str::<f64>("not json").unwrap_err().into();
        assert_eq!(err.error_code(), "SERIALIZATION_ERROR");
    }
}
