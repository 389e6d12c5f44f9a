//! Response shaping for not-found and failure outcomes.
//!
//! [`ResponseMode::Legacy`] reproduces the wire contract existing clients
//! depend on: a missing row is a 200 with a plain-text message, store
//! failures echo `{name, message}`, and the status on failure depends on the
//! operation (some answer 500, get-one and update answer 200).
//!
//! [`ResponseMode::Rest`] answers 404 for missing rows and maps every
//! failure through [`AppError`] to a non-2xx `{error, code}` envelope.

use std::str::FromStr;

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use serde_json::json;
use stockroom_core::error::CoreError;
use stockroom_core::types::DbId;
use stockroom_db::StoreError;

use crate::error::AppError;
use crate::reply::Reply;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseMode {
    Legacy,
    Rest,
}

impl FromStr for ResponseMode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "legacy" | "compat" => Ok(Self::Legacy),
            "rest" => Ok(Self::Rest),
            _ => Err(()),
        }
    }
}

impl ResponseMode {
    /// Reply for a lookup that found no row.
    ///
    /// `legacy_text` is the exact plain-text body legacy clients expect.
    pub fn not_found(self, entity: &'static str, id: DbId, legacy_text: &'static str) -> Reply {
        tracing::debug!(entity, id, "Row not found");
        match self {
            ResponseMode::Legacy => Reply::text(StatusCode::OK, legacy_text),
            ResponseMode::Rest => AppError::Core(CoreError::NotFound { entity, id }).into_reply(),
        }
    }

    /// Reply for a failed store call.
    ///
    /// `legacy_status` is the status the operation answers with in legacy mode.
    pub fn store_failure(self, err: StoreError, legacy_status: StatusCode) -> Reply {
        tracing::error!(error = %err, kind = err.kind(), "Store operation failed");
        match self {
            ResponseMode::Legacy => Reply::json_value(
                legacy_status,
                json!({
                    "name": err.kind(),
                    "message": err.to_string(),
                }),
            ),
            ResponseMode::Rest => AppError::Store(err).into_reply(),
        }
    }

    /// Reply for a request body that could not be read as the expected JSON.
    ///
    /// Follows the operation's failure path, like a store rejecting the values.
    pub fn invalid_body(self, rejection: JsonRejection, legacy_status: StatusCode) -> Reply {
        tracing::warn!(error = %rejection.body_text(), "Rejected request body");
        match self {
            ResponseMode::Legacy => Reply::json_value(
                legacy_status,
                json!({
                    "name": "InvalidBody",
                    "message": rejection.body_text(),
                }),
            ),
            ResponseMode::Rest => AppError::Body(rejection).into_reply(),
        }
    }

    /// Reply for an update whose write or read-back step came up empty.
    pub fn update_failure(self, message: &'static str) -> Reply {
        tracing::error!(error = message, "Update failed");
        match self {
            ResponseMode::Legacy => Reply::text(StatusCode::OK, message),
            ResponseMode::Rest => {
                AppError::Core(CoreError::Internal(message.to_string())).into_reply()
            }
        }
    }
}
