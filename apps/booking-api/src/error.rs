//! Error taxonomy for the booking API operation layer.
//!
//! Every operation returns `ApiResult<T>`; the transport maps each variant
//! to exactly one HTTP status via [`ApiError::status_code`].

use haven_core::{AggregationError, ValidationError};
use haven_db::DbError;

/// Operation-layer errors.
///
/// ## Status Mapping
/// ```text
/// Unauthenticated → 401    (identity gate: missing/expired/forged token)
/// Forbidden       → 403    (role gate: missing record or role mismatch)
/// NotFound        → 404    (missing room, booking, principal)
/// Validation      → 400    (caller input rejected before any write)
/// PaymentBridge   → 502    (payment processor rejected or unreachable)
/// Aggregation     → 500    (statistics snapshot failed; logged with cause)
/// Persistence     → 500    (database failure other than not-found)
/// ```
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Authentication failed: {0}")]
    Unauthenticated(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid request: {0}")]
    Validation(#[from] ValidationError),

    #[error("Payment bridge error: {0}")]
    PaymentBridge(String),

    #[error("Aggregation failed: {0}")]
    Aggregation(#[from] AggregationError),

    #[error("Persistence failed: {0}")]
    Persistence(String),
}

impl ApiError {
    /// HTTP status the transport responds with for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::Unauthenticated(_) => 401,
            ApiError::Forbidden(_) => 403,
            ApiError::NotFound(_) => 404,
            ApiError::Validation(_) => 400,
            ApiError::PaymentBridge(_) => 502,
            ApiError::Aggregation(_) => 500,
            ApiError::Persistence(_) => 500,
        }
    }
}

impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => ApiError::NotFound(format!("{entity}: {id}")),
            other => ApiError::Persistence(other.to_string()),
        }
    }
}

/// Result type for operation-layer functions.
pub type ApiResult<T> = Result<T, ApiError>;
