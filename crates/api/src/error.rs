use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use stockroom_core::error::CoreError;
use stockroom_db::StoreError;

use crate::reply::Reply;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and [`StoreError`] for persistence
/// failures. Renders as the `{"error", "code"}` envelope used by the REST
/// response mode.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `stockroom_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A failure reported by the store.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A request body that is not JSON of the expected shape.
    #[error(transparent)]
    Body(#[from] JsonRejection),
}

impl AppError {
    /// Build the enveloped reply for this error.
    pub fn into_reply(self) -> Reply {
        let (status, code, message) = match &self {
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("{entity} with id {id} not found"),
                ),
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "INTERNAL_ERROR",
                        "An internal error occurred".to_string(),
                    )
                }
            },

            AppError::Store(store) => match store {
                StoreError::InvalidIdentifier(raw) => (
                    StatusCode::BAD_REQUEST,
                    "BAD_REQUEST",
                    format!("Invalid identifier: {raw:?}"),
                ),
                StoreError::ForeignKeyViolation(msg) => {
                    (StatusCode::CONFLICT, "CONFLICT", msg.clone())
                }
                StoreError::Database(err) => {
                    tracing::error!(error = %err, "Database error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "INTERNAL_ERROR",
                        "An internal error occurred".to_string(),
                    )
                }
            },

            AppError::Body(rejection) => (
                StatusCode::BAD_REQUEST,
                "BAD_REQUEST",
                rejection.body_text(),
            ),
        };

        Reply::json_value(
            status,
            json!({
                "error": message,
                "code": code,
            }),
        )
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        self.into_reply().into_response()
    }
}
