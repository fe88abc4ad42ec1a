//! Error envelope returned by every endpoint.
//!
//! Clients only ever see a short fixed message; the underlying error is
//! logged here and dropped.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;
use tracing::error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("not found: {0}")]
    NotFound(&'static str),

    #[error("{message}: {source}")]
    Internal {
        message: &'static str,
        #[source]
        source: sn_core::Error,
    },
}

impl ApiError {
    /// Map a service error onto the envelope, keeping `message` as the
    /// client-facing text for anything that is not a missing article.
    pub fn from_service(message: &'static str) -> impl FnOnce(sn_core::Error) -> Self {
        move |e| match e {
            sn_core::Error::NotFound(_) => ApiError::NotFound(ARTICLE_NOT_FOUND),
            source => ApiError::Internal { message, source },
        }
    }
}

pub const ARTICLE_NOT_FOUND: &str = "Article not found";

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::NotFound(m) => (StatusCode::NOT_FOUND, *m),
            ApiError::Internal { message, source } => {
                error!(error = %source, "{}", message);
                (StatusCode::INTERNAL_SERVER_ERROR, *message)
            }
        };
        (status, Json(json!({ "success": false, "error": message }))).into_response()
    }
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;
