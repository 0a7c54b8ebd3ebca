use super::state::ApiStateError;
use atlas_database::DatabaseError;
use atlas_domain::error::ValidationError;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use tracing::error;
use utoipa::ToSchema;

/// Error taxonomy of the HTTP surface.
///
/// Every failure maps to a structured JSON body; no partial success is ever
/// reported as full success.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Malformed request body or parameters.
    #[error("{0}")]
    BadRequest(String),

    /// A value object failed validated construction.
    #[error("{0}")]
    Validation(String),

    /// The addressed entity does not exist.
    #[error("{0}")]
    NotFound(String),

    /// A mutation was aimed at an entity whose id cannot be resolved.
    #[error("{0}")]
    Precondition(String),

    /// Persistence-backend or other internal failure.
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    const fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Precondition(_) => StatusCode::PRECONDITION_FAILED,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    const fn code(&self) -> &'static str {
        match self {
            Self::BadRequest(_) => "BAD_REQUEST",
            Self::Validation(_) => "VALIDATION",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Precondition(_) => "PRECONDITION",
            Self::Internal(_) => "INTERNAL",
        }
    }
}

/// Structured error payload returned for every failed request.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    pub error: &'static str,
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if matches!(self, Self::Internal(_)) {
            error!(message = %self, "Request failed with internal error");
        }

        let body = ErrorBody { error: self.code(), message: self.to_string() };
        (self.status(), Json(body)).into_response()
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        Self::Validation(err.to_string())
    }
}

impl From<DatabaseError> for ApiError {
    fn from(err: DatabaseError) -> Self {
        Self::Internal(err.to_string())
    }
}

impl From<ApiStateError> for ApiError {
    fn from(err: ApiStateError) -> Self {
        Self::Internal(err.to_string())
    }
}
