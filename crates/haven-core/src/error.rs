//! # Error Types
//!
//! Domain-specific error types for haven-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  haven-core errors (this file)                                         │
//! │  ├── ValidationError   - Input validation failures                     │
//! │  └── AggregationError  - Statistics snapshot failures                  │
//! │                                                                         │
//! │  haven-db errors (separate crate)                                      │
//! │  └── DbError           - Database operation failures                   │
//! │                                                                         │
//! │  booking-api errors (operation layer)                                  │
//! │  └── ApiError          - What the transport maps to status codes       │
//! │                                                                         │
//! │  Flow: ValidationError → ApiError / AggregationError → ApiError        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (field, offending value, etc.)
//! 3. Errors are enum variants, never String

use thiserror::Error;

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when caller input doesn't meet requirements.
/// Used for early validation before any persistence runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., malformed email, malformed date).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value is not in the closed set of allowed values.
    ///
    /// ## When This Occurs
    /// - Role assignment with an unknown role string
    /// - Member status outside {none, requested, verified}
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },
}

// =============================================================================
// Aggregation Error
// =============================================================================

/// Statistics aggregation failures.
///
/// A snapshot is all-or-nothing: a single malformed stored date fails the
/// whole aggregation rather than silently dropping a bucket. The operation
/// layer logs these and maps them to an internal-error response.
#[derive(Debug, Error)]
pub enum AggregationError {
    /// A stored booking date could not be normalized into a calendar date.
    #[error("unparseable booking date: '{value}'")]
    UnparseableDate { value: String },
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Convenience type alias for validation results.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "role".to_string(),
        };
        assert_eq!(err.to_string(), "role is required");

        let err = ValidationError::NotAllowed {
            field: "role".to_string(),
            allowed: vec!["guest".to_string(), "host".to_string()],
        };
        assert!(err.to_string().contains("must be one of"));
    }

    #[test]
    fn test_aggregation_error_names_offending_value() {
        let err = AggregationError::UnparseableDate {
            value: "tomorrow".to_string(),
        };
        assert_eq!(err.to_string(), "unparseable booking date: 'tomorrow'");
    }
}
