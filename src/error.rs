// src/error.rs
// Request-scoped error taxonomy and its HTTP mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::store::StoreError;

/// Everything a single request can fail with. None of these are fatal to
/// the process; each is reported to the caller and forgotten.
#[derive(Error, Debug)]
pub enum CalcError {
    #[error("Error: unknown operation: {0}")]
    UnknownOperation(String),
    #[error("{0}")]
    InsufficientOperands(String),
    #[error("{0}")]
    InvalidArgumentShape(String),
    #[error("Error: {operation} requires {required} arguments")]
    InvalidArity { operation: String, required: usize },
    #[error("Error while performing operation Divide: division by 0")]
    DivisionByZero,
    #[error("{0}")]
    InvalidArgument(String),
    #[error("Error: unknown persistence store: {0}")]
    InvalidSelector(String),
    #[error("persistence failure: {0}")]
    Persistence(#[from] StoreError),
}

impl CalcError {
    pub fn unknown_operation(name: impl Into<String>) -> Self {
        Self::UnknownOperation(name.into())
    }

    /// A stack operation that needs more operands than the stack holds.
    pub fn insufficient_for(operation: &str, required: usize, available: usize) -> Self {
        Self::InsufficientOperands(format!(
            "Error: cannot implement operation {operation}. It requires {required} arguments \
             and the stack has only {available} arguments"
        ))
    }

    /// A removal request that exceeds the current stack size.
    pub fn cannot_remove(count: usize, available: usize) -> Self {
        Self::InsufficientOperands(format!(
            "Error: cannot remove {count} from the stack. It has only {available} arguments"
        ))
    }

    pub fn arguments_not_a_list() -> Self {
        Self::InvalidArgumentShape("Error: body must contain \"arguments\" array".into())
    }

    pub fn factorial_out_of_domain() -> Self {
        Self::InvalidArgument(
            "Error while performing operation Factorial: not supported for the negative number"
                .into(),
        )
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidArgumentShape(_) | Self::InvalidSelector(_) => StatusCode::BAD_REQUEST,
            Self::UnknownOperation(_)
            | Self::InsufficientOperands(_)
            | Self::InvalidArity { .. }
            | Self::DivisionByZero
            | Self::InvalidArgument(_) => StatusCode::CONFLICT,
            Self::Persistence(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for CalcError {
    fn into_response(self) -> Response {
        if let Self::Persistence(ref e) = self {
            error!("persistence failure: {e}");
        }
        let status = self.status_code();
        (status, Json(json!({ "errorMessage": self.to_string() }))).into_response()
    }
}

/// Result type alias for request handling.
pub type CalcResult<T> = Result<T, CalcError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping_follows_taxonomy() {
        assert_eq!(
            CalcError::unknown_operation("sqrt").status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            CalcError::arguments_not_a_list().status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            CalcError::InvalidSelector("REDIS".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(CalcError::DivisionByZero.status_code(), StatusCode::CONFLICT);
        assert_eq!(
            CalcError::cannot_remove(4, 1).status_code(),
            StatusCode::CONFLICT
        );
    }

    #[test]
    fn messages_carry_counts() {
        let err = CalcError::insufficient_for("Minus", 2, 1);
        let msg = err.to_string();
        assert!(msg.contains("Minus"));
        assert!(msg.contains("requires 2 arguments"));
        assert!(msg.contains("only 1 arguments"));
    }
}
