//! # Error handling
//!
//! Three layers of errors:
//!
//! - [`FilterError`]: a filter could not be turned into a predicate. Raised
//!   synchronously, before any query runs.
//! - [`DataError`]: what repository and service calls return. Engine
//!   failures are wrapped unchanged in [`DataError::Persistence`]; services
//!   that validate input report [`DataError::Validation`].
//! - [`ApiError`]: HTTP mapping for axum handlers. Internal details are
//!   logged with `tracing` and never sent to clients.
//!
//! ```rust,ignore
//! async fn list(
//!     State(db): State<DatabaseConnection>,
//!     Query(query): Query<ListQuery>,
//! ) -> Result<Json<PaginationResponse<person::Model>>, ApiError> {
//!     let predicate = build_predicate::<People>(&query.filters()?)?;
//!     let repo = SeaRepository::<People>::new(db);
//!     let page = repo.find_page_by_predicate(&predicate, &query.page_request()).await?;
//!     Ok(Json(shape_response(page)))
//! }
//! ```

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sea_orm::DbErr;
use serde::Serialize;
use std::fmt;

use crate::filter::Operation;
use crate::validation::ValidationErrors;

/// A filter that cannot be applied to the target resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterError {
    /// The field does not name a filterable column.
    UnknownField { field: String },
    /// An ordering operator was used with a non-ordinal value or column, or
    /// with a value the column's type does not order against.
    NotOrdinal { field: String, operation: Operation },
    /// The value (or `LIKE` itself) does not fit the column's type.
    TypeMismatch { field: String, operation: Operation },
    /// `LIKE` needs a non-null operand.
    NullPattern { field: String },
    /// The filter JSON could not be parsed.
    Malformed(String),
}

impl fmt::Display for FilterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownField { field } => write!(f, "Unknown filter field '{field}'"),
            Self::NotOrdinal { field, operation } => {
                write!(f, "{operation} requires an ordinal value for field '{field}'")
            }
            Self::TypeMismatch { field, operation } => {
                write!(f, "{operation} value does not match the type of field '{field}'")
            }
            Self::NullPattern { field } => write!(f, "LIKE requires a value for field '{field}'"),
            Self::Malformed(msg) => write!(f, "Malformed filter: {msg}"),
        }
    }
}

impl std::error::Error for FilterError {}

/// Error returned by repository and service operations.
#[derive(Debug)]
pub enum DataError {
    InvalidFilter(FilterError),
    Validation(ValidationErrors),
    /// Propagated from the persistence engine as-is.
    Persistence(DbErr),
}

impl DataError {
    /// True when the engine reported a missing record.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Persistence(DbErr::RecordNotFound(_)))
    }
}

impl fmt::Display for DataError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidFilter(err) => write!(f, "Invalid filter: {err}"),
            Self::Validation(errors) => write!(f, "{errors}"),
            Self::Persistence(err) => write!(f, "Persistence error: {err}"),
        }
    }
}

impl std::error::Error for DataError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidFilter(err) => Some(err),
            Self::Validation(errors) => Some(errors),
            Self::Persistence(err) => Some(err),
        }
    }
}

impl From<DbErr> for DataError {
    fn from(err: DbErr) -> Self {
        Self::Persistence(err)
    }
}

impl From<FilterError> for DataError {
    fn from(err: FilterError) -> Self {
        Self::InvalidFilter(err)
    }
}

impl From<ValidationErrors> for DataError {
    fn from(errors: ValidationErrors) -> Self {
        Self::Validation(errors)
    }
}

/// API error type with logging and sanitized responses
#[derive(Debug)]
pub enum ApiError {
    /// 400 Bad Request
    BadRequest { message: String },

    /// 404 Not Found
    NotFound { resource: String },

    /// 422 Unprocessable Entity
    ValidationFailed { errors: Vec<String> },

    /// 500, details logged only
    Database { message: String, internal: DbErr },

    /// 500, details logged only
    Internal {
        message: String,
        internal: Option<String>,
    },
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
        }
    }

    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound {
            resource: resource.into(),
        }
    }

    #[must_use]
    pub fn validation_failed(errors: Vec<String>) -> Self {
        Self::ValidationFailed { errors }
    }

    #[must_use]
    pub fn database(err: DbErr) -> Self {
        Self::Database {
            message: "A database error occurred".to_string(),
            internal: err,
        }
    }

    pub fn internal(message: impl Into<String>, internal: Option<String>) -> Self {
        Self::Internal {
            message: message.into(),
            internal,
        }
    }

    /// HTTP status for this error
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest { .. } => StatusCode::BAD_REQUEST,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::ValidationFailed { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Database { .. } | Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message that is safe to send to clients
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::BadRequest { message }
            | Self::Database { message, .. }
            | Self::Internal { message, .. } => message.clone(),
            Self::NotFound { resource } => format!("{resource} not found"),
            Self::ValidationFailed { errors } => {
                if errors.len() == 1 {
                    errors[0].clone()
                } else {
                    format!("Validation failed: {}", errors.join(", "))
                }
            }
        }
    }

    fn log_internal(&self) {
        match self {
            Self::Database { internal, .. } => {
                tracing::error!(error = ?internal, "Database error occurred");
            }
            Self::Internal {
                internal: Some(details),
                ..
            } => {
                tracing::error!(details = %details, "Internal error occurred");
            }
            _ => {
                tracing::debug!(
                    error = %self.user_message(),
                    status = %self.status_code(),
                    "API error"
                );
            }
        }
    }
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<Vec<String>>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        self.log_internal();

        let status = self.status_code();
        let body = match &self {
            Self::ValidationFailed { errors } => ErrorResponse {
                error: "Validation failed".to_string(),
                details: Some(errors.clone()),
            },
            _ => ErrorResponse {
                error: self.user_message(),
                details: None,
            },
        };

        (status, Json(body)).into_response()
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.user_message())
    }
}

impl std::error::Error for ApiError {}

impl From<FilterError> for ApiError {
    fn from(err: FilterError) -> Self {
        Self::bad_request(err.to_string())
    }
}

/// `RecordNotFound` becomes 404, any other engine error a logged 500.
impl From<DbErr> for ApiError {
    fn from(err: DbErr) -> Self {
        match &err {
            DbErr::RecordNotFound(msg) => {
                let resource = msg.split_whitespace().next().unwrap_or("Resource");
                Self::not_found(resource)
            }
            _ => Self::database(err),
        }
    }
}

impl From<DataError> for ApiError {
    fn from(err: DataError) -> Self {
        match err {
            DataError::InvalidFilter(err) => err.into(),
            DataError::Validation(errors) => errors.into(),
            DataError::Persistence(err) => err.into(),
        }
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        Self::validation_failed(errors.errors().iter().map(ToString::to_string).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::ValidationError;

    #[test]
    fn test_filter_error_messages() {
        let err = FilterError::UnknownField {
            field: "nope".to_string(),
        };
        assert_eq!(err.to_string(), "Unknown filter field 'nope'");

        let err = FilterError::NotOrdinal {
            field: "active".to_string(),
            operation: Operation::GreaterThan,
        };
        assert_eq!(
            err.to_string(),
            "GREATER_THAN requires an ordinal value for field 'active'"
        );

        let err = FilterError::TypeMismatch {
            field: "age".to_string(),
            operation: Operation::Like,
        };
        assert_eq!(err.to_string(), "LIKE value does not match the type of field 'age'");
        assert_eq!(ApiError::from(err).status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_db_err_is_wrapped_unchanged() {
        let err: DataError = DbErr::Custom("boom".to_string()).into();
        match err {
            DataError::Persistence(DbErr::Custom(msg)) => assert_eq!(msg, "boom"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_is_not_found() {
        let err: DataError = DbErr::RecordNotFound("person not found".to_string()).into();
        assert!(err.is_not_found());
        let err: DataError = FilterError::Malformed("x".to_string()).into();
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_invalid_filter_becomes_400() {
        let err: ApiError = DataError::InvalidFilter(FilterError::UnknownField {
            field: "x".to_string(),
        })
        .into();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.user_message(), "Unknown filter field 'x'");
    }

    #[test]
    fn test_record_not_found_becomes_404() {
        let err: ApiError =
            DataError::Persistence(DbErr::RecordNotFound("person not found".to_string())).into();
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(err.user_message(), "person not found");
    }

    #[test]
    fn test_other_db_errors_are_sanitized() {
        let err: ApiError = DbErr::Custom("secret table name".to_string()).into();
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.user_message(), "A database error occurred");
    }

    #[test]
    fn test_validation_errors_become_422() {
        let mut errors = ValidationErrors::new();
        errors.add(ValidationError::new("name", "Invalid field"));
        errors.add(ValidationError::new("email", "Invalid field"));
        let err: ApiError = errors.into();
        assert_eq!(err.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(
            err.user_message(),
            "Validation failed: name: Invalid field, email: Invalid field"
        );
    }

    #[test]
    fn test_service_validation_becomes_422() {
        let mut errors = ValidationErrors::new();
        errors.add(ValidationError::new("name", "Invalid field"));
        let err: ApiError = DataError::from(errors).into();
        assert_eq!(err.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(err.user_message(), "name: Invalid field");
    }

    #[test]
    fn test_into_response_status() {
        let response = ApiError::bad_request("nope").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = ApiError::internal("failed", Some("stack".to_string())).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
