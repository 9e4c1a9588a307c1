//! JSON error envelope returned by the HTTP routes.

use std::any::Any;

use axum::Json;
use axum::extract::rejection::{PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

/// Message for panics caught outside the movie detail route.
const PANIC_MESSAGE: &str = "Internal server error";

/// Message for panics caught inside the movie detail route.
const DETAILS_PANIC_MESSAGE: &str = "Internal server error while fetching movie details";

/// Errors surfaced to HTTP callers as `{"error": message}`.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Local validation failed before any upstream call.
    #[error("{0}")]
    BadRequest(&'static str),
    /// Upstream reported no data for a single-item lookup.
    #[error("{0}")]
    NotFound(&'static str),
    /// Upstream data needed to answer is missing.
    #[error("{0}")]
    Internal(&'static str),
    /// The query string could not be decoded.
    #[error(transparent)]
    Query(#[from] QueryRejection),
    /// A path parameter could not be decoded.
    #[error(transparent)]
    Path(#[from] PathRejection),
}

/// Result alias for route handlers.
pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Query(rejection) => rejection.status(),
            Self::Path(rejection) => rejection.status(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("{self}");
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

/// Response for a panic caught by `CatchPanicLayer`.
#[allow(clippy::needless_pass_by_value)]
pub fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    internal_error_response(PANIC_MESSAGE, &*err)
}

/// Response for a panic caught while serving a movie detail request.
#[allow(clippy::needless_pass_by_value)]
pub fn details_panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    internal_error_response(DETAILS_PANIC_MESSAGE, &*err)
}

fn internal_error_response(message: &'static str, err: &(dyn Any + Send)) -> Response {
    let detail = err
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| err.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    tracing::error!(detail, "{message}");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": message })),
    )
        .into_response()
}
