//! # Error handling for the CRUD endpoints
//!
//! Every failure on the request path ends up as an [`ApiError`], which picks
//! the HTTP status and renders a small JSON body:
//!
//! ```json
//! {"error": "Entity of type CardTransaction with id = 10000 not found"}
//! ```
//!
//! | Source | Status |
//! |---|---|
//! | identifier absent from the store | 404 |
//! | malformed or mistyped payload ([`DecodeError`]) | 400 |
//! | invalid `page` / `per_page` ([`BadParameterError`]) | 400 |
//! | store failure ([`DbErr`]) | 500 |
//!
//! Server errors carry the error kind and its text, never a backtrace. They are
//! logged at info level through `tracing`; client errors at debug level.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sea_orm::DbErr;
use serde::Serialize;
use std::fmt;

use crate::codec::DecodeError;
use crate::pagination::BadParameterError;

#[derive(Debug)]
pub enum ApiError {
    /// 404 Not Found
    NotFound {
        /// Resource type, e.g. "CardTransaction"
        resource: String,
        id: Option<String>,
    },

    /// 400 Bad Request
    BadRequest { message: String },

    /// 500 Internal Server Error raised by the store
    Store { internal: DbErr },

    /// 500 Internal Server Error from anything else
    Internal {
        message: String,
        internal: Option<String>,
    },
}

impl ApiError {
    pub fn not_found(resource: impl Into<String>, id: Option<String>) -> Self {
        Self::NotFound {
            resource: resource.into(),
            id,
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
        }
    }

    pub fn store(err: DbErr) -> Self {
        Self::Store { internal: err }
    }

    pub fn internal(message: impl Into<String>, internal: Option<String>) -> Self {
        Self::Internal {
            message: message.into(),
            internal,
        }
    }

    /// Wrap any unexpected error as a 500 whose message is `"{kind} - {text}"`.
    pub fn unexpected<E: std::error::Error>(err: &E) -> Self {
        Self::Internal {
            message: format!("{} - {}", short_type_name::<E>(), err),
            internal: Some(format!("{err:?}")),
        }
    }

    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::BadRequest { .. } => StatusCode::BAD_REQUEST,
            Self::Store { .. } | Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message placed in the response body
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::NotFound { resource, id } => match id {
                Some(id) => format!("Entity of type {resource} with id = {id} not found"),
                None => format!("Entity of type {resource} not found"),
            },
            Self::BadRequest { message } | Self::Internal { message, .. } => message.clone(),
            Self::Store { internal } => format!("{} - {}", short_type_name::<DbErr>(), internal),
        }
    }

    fn log(&self) {
        match self {
            Self::Store { internal } => {
                tracing::info!(error = ?internal, "Store error while handling request");
            }
            Self::Internal {
                message,
                internal: Some(details),
            } => {
                tracing::info!(message = %message, details = %details, "Internal error");
            }
            Self::Internal {
                message,
                internal: None,
            } => {
                tracing::info!(message = %message, "Internal error");
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

fn short_type_name<T: ?Sized>() -> &'static str {
    let full = std::any::type_name::<T>();
    full.rsplit("::").next().unwrap_or(full)
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        self.log();
        let status = self.status_code();
        let body = ErrorResponse {
            error: self.user_message(),
        };
        (status, Json(body)).into_response()
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.user_message())
    }
}

impl std::error::Error for ApiError {}

/// `DbErr::RecordNotFound` becomes a 404, every other store error a 500.
impl From<DbErr> for ApiError {
    fn from(err: DbErr) -> Self {
        match err {
            DbErr::RecordNotFound(msg) => {
                let resource = msg.split_whitespace().next().unwrap_or("Resource");
                Self::NotFound {
                    resource: resource.to_string(),
                    id: None,
                }
            }
            other => Self::Store { internal: other },
        }
    }
}

impl From<DecodeError> for ApiError {
    fn from(err: DecodeError) -> Self {
        Self::bad_request(err.to_string())
    }
}

impl From<BadParameterError> for ApiError {
    fn from(err: BadParameterError) -> Self {
        Self::bad_request(err.to_string())
    }
}
