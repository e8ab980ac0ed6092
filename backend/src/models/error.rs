//! Error response envelope.
//!
//! Every failure leaves the service as an [`Error`] serialised to JSON. The
//! ambient trace identifier is captured at construction and echoed in the
//! `trace-id` response header.

use crate::middleware::trace::{TRACE_ID_HEADER, TraceId};
use crate::models::schema::{SchemaError, Violation};
use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::{error, warn};
use utoipa::ToSchema;

const REDACTED_MESSAGE: &str = "Internal server error";

/// Stable machine-readable error code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[non_exhaustive]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// The request could not be read as JSON.
    InvalidRequest,
    /// The request was readable but does not match the declared shape.
    ValidationFailed,
    /// No route matches the request.
    NotFound,
    /// An unexpected error occurred on the server.
    InternalError,
}

impl ErrorCode {
    fn as_status_code(self) -> StatusCode {
        match self {
            ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
            ErrorCode::ValidationFailed => StatusCode::UNPROCESSABLE_ENTITY,
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// API error response payload.
///
/// # Examples
/// ```
/// use users_api::models::{Error, ErrorCode};
///
/// let err = Error::new(ErrorCode::NotFound, "missing");
/// assert_eq!(err.code, ErrorCode::NotFound);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
pub struct Error {
    /// Stable machine-readable error code.
    #[schema(example = "validation_failed")]
    pub code: ErrorCode,
    /// Human-readable error message.
    #[schema(example = "request validation failed")]
    pub message: String,
    /// Correlation identifier for tracing this error across systems.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    #[serde(alias = "trace_id")]
    pub trace_id: Option<String>,
    /// Supplementary error details.
    ///
    /// Validation failures use `{ "errors": [{ "loc": [...], "code": ..., "message": ... }] }`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl Error {
    /// Create a new error, capturing the trace identifier in scope.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            trace_id: TraceId::current().map(|id| id.to_string()),
            details: None,
        }
    }

    /// Attach a trace identifier to the error.
    ///
    /// # Examples
    /// ```
    /// use users_api::models::Error;
    /// let err = Error::not_found("nope").with_trace_id("abc");
    /// assert_eq!(err.trace_id.as_deref(), Some("abc"));
    /// ```
    pub fn with_trace_id(mut self, id: impl Into<String>) -> Self {
        self.trace_id = Some(id.into());
        self
    }

    /// Attach structured details to the error.
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Convenience constructor for [`ErrorCode::InvalidRequest`].
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidRequest, message)
    }

    /// Convenience constructor for [`ErrorCode::ValidationFailed`] carrying
    /// one entry per violation.
    ///
    /// # Examples
    /// ```
    /// use users_api::models::Error;
    /// use users_api::models::schema::Violation;
    ///
    /// let err = Error::validation_failed(vec![Violation::new(
    ///     vec!["body".into(), "email".into()],
    ///     "missing",
    ///     "Field required",
    /// )]);
    /// assert!(err.details.is_some());
    /// ```
    pub fn validation_failed(violations: Vec<Violation>) -> Self {
        Self::new(ErrorCode::ValidationFailed, "request validation failed")
            .with_details(json!({ "errors": violations }))
    }

    /// Convenience constructor for [`ErrorCode::NotFound`].
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }

    /// Convenience constructor for [`ErrorCode::InternalError`].
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}

impl From<SchemaError> for Error {
    fn from(err: SchemaError) -> Self {
        Error::validation_failed(err.violations())
    }
}

impl From<actix_web::Error> for Error {
    fn from(err: actix_web::Error) -> Self {
        // Do not leak implementation details to clients.
        error!(error = %err, "actix error promoted to API error");
        Error::internal(REDACTED_MESSAGE)
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for Error {}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        self.code.as_status_code()
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let mut builder = HttpResponse::build(status);
        if let Some(id) = &self.trace_id {
            builder.insert_header((TRACE_ID_HEADER, id.clone()));
        }
        if matches!(self.code, ErrorCode::InternalError) {
            error!(message = %self.message, "request failed");
            let mut redacted = self.clone();
            redacted.message = REDACTED_MESSAGE.to_owned();
            redacted.details = None;
            return builder.json(redacted);
        }
        warn!(status = status.as_u16(), code = ?self.code, message = %self.message, "request rejected");
        builder.json(self)
    }
}
