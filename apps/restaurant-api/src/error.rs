//! Service errors for the restaurant API.
//!
//! Every failure that crosses the use-case or handler boundary is a
//! [`ServiceError`]: an [`ErrorCode`], a human-readable message, and
//! key/value context for clients and logs.
//!
//! # HTTP Status Codes
//!
//! | Code | Status | Usage |
//! |------|--------|-------|
//! | `INVALID_INPUT` | 400 | Missing or malformed field, empty patch |
//! | `*_NOT_FOUND` | 404 | Referenced or addressed entity absent |
//! | `INTEGRITY_VIOLATION` | 409 | Store constraint rejected a write |
//! | `STORE_UNAVAILABLE` | 503 | Connection could not be acquired |
//! | `STORE_ERROR` | 500 | Query, decoding or commit failure |

use std::collections::BTreeMap;

use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::shared::{DomainError, StoreError};

/// Error codes surfaced to clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Malformed or incomplete request.
    InvalidInput,

    /// Restaurant not found.
    RestaurantNotFound,
    /// Dish not found (or not under the addressed restaurant).
    DishNotFound,
    /// Order not found.
    OrderNotFound,
    /// Rating not found.
    RatingNotFound,

    /// Foreign-key, unique, check or not-null constraint violated.
    IntegrityViolation,

    /// The store could not be reached.
    StoreUnavailable,
    /// The store rejected or failed a query.
    StoreError,
}

impl ErrorCode {
    /// HTTP status for this error.
    #[must_use]
    pub const fn http_status(&self) -> StatusCode {
        match self {
            Self::InvalidInput => StatusCode::BAD_REQUEST,

            Self::RestaurantNotFound
            | Self::DishNotFound
            | Self::OrderNotFound
            | Self::RatingNotFound => StatusCode::NOT_FOUND,

            Self::IntegrityViolation => StatusCode::CONFLICT,

            Self::StoreUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            Self::StoreError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Stable reason string.
    #[must_use]
    pub const fn reason(&self) -> &'static str {
        match self {
            Self::InvalidInput => "INVALID_INPUT",
            Self::RestaurantNotFound => "RESTAURANT_NOT_FOUND",
            Self::DishNotFound => "DISH_NOT_FOUND",
            Self::OrderNotFound => "ORDER_NOT_FOUND",
            Self::RatingNotFound => "RATING_NOT_FOUND",
            Self::IntegrityViolation => "INTEGRITY_VIOLATION",
            Self::StoreUnavailable => "STORE_UNAVAILABLE",
            Self::StoreError => "STORE_ERROR",
        }
    }

    /// Whether this code reports a client mistake rather than a server fault.
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        self.http_status().is_client_error()
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.reason())
    }
}

/// A rich error with context.
#[derive(Debug, Error)]
pub struct ServiceError {
    code: ErrorCode,
    message: String,
    context: Vec<(String, String)>,
}

impl ServiceError {
    /// Create a new service error.
    #[must_use]
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            context: Vec::new(),
        }
    }

    /// Add context to the error.
    #[must_use]
    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.context.push((key.into(), value.into()));
        self
    }

    /// Get the error code.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        self.code
    }

    /// Get the message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the context.
    #[must_use]
    pub fn context(&self) -> &[(String, String)] {
        &self.context
    }

    /// Look up one context value.
    #[must_use]
    pub fn context_value(&self, key: &str) -> Option<&str> {
        self.context
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Convert to the JSON error body.
    #[must_use]
    pub fn to_http_response(&self) -> HttpErrorResponse {
        HttpErrorResponse {
            code: self.code.reason().to_string(),
            message: self.message.clone(),
            details: self.context.iter().cloned().collect(),
        }
    }
}

impl std::fmt::Display for ServiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code.reason(), self.message)
    }
}

/// JSON error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpErrorResponse {
    /// Error code string.
    pub code: String,
    /// Human-readable message.
    pub message: String,
    /// Additional details.
    pub details: BTreeMap<String, String>,
}

/// Convenience constructors for common errors.
impl ServiceError {
    /// Malformed or incomplete request.
    #[must_use]
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidInput, message)
    }

    /// Restaurant not found.
    #[must_use]
    pub fn restaurant_not_found(id: impl std::fmt::Display) -> Self {
        let id = id.to_string();
        Self::new(
            ErrorCode::RestaurantNotFound,
            format!("Restaurant {id} not found"),
        )
        .with_context("restaurant_id", id)
    }

    /// Dish not found.
    #[must_use]
    pub fn dish_not_found(id: impl std::fmt::Display) -> Self {
        let id = id.to_string();
        Self::new(ErrorCode::DishNotFound, format!("Dish {id} not found")).with_context("dish_id", id)
    }

    /// Order not found.
    #[must_use]
    pub fn order_not_found(id: impl std::fmt::Display) -> Self {
        let id = id.to_string();
        Self::new(ErrorCode::OrderNotFound, format!("Order {id} not found"))
            .with_context("order_id", id)
    }

    /// Rating not found.
    #[must_use]
    pub fn rating_not_found(id: impl std::fmt::Display) -> Self {
        let id = id.to_string();
        Self::new(ErrorCode::RatingNotFound, format!("Rating {id} not found"))
            .with_context("rating_id", id)
    }
}

impl From<DomainError> for ServiceError {
    fn from(err: DomainError) -> Self {
        let field = err.field().map(str::to_string);
        let error = Self::invalid_input(err.to_string());
        match field {
            Some(field) => error.with_context("field", field),
            None => error,
        }
    }
}

impl From<StoreError> for ServiceError {
    fn from(err: StoreError) -> Self {
        let code = match err {
            StoreError::Connection(_) => ErrorCode::StoreUnavailable,
            StoreError::Integrity(_) => ErrorCode::IntegrityViolation,
            StoreError::Query(_) | StoreError::Serialization(_) | StoreError::MissingField(_) => {
                ErrorCode::StoreError
            }
        };
        Self::new(code, err.to_string())
    }
}
