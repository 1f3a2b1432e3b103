//! Typed error handling for the order backend
//!
//! Every failure a request can run into is one of three categories:
//!
//! - [`ValidationError`]: the client sent something the bakery cannot accept (4xx)
//! - [`StorageError`]: the order store could not be reached or failed (5xx)
//! - [`UploadError`]: the reference image could not be written (5xx)
//!
//! [`BakeryError`] wraps them and knows how to render itself as an HTTP
//! response with a `detail` message and a stable `code`.
//!
//! # Example
//!
//! ```rust,ignore
//! match service.submit(submission).await {
//!     Ok(receipt) => println!("order {} costs {}", receipt.id, receipt.price_omr),
//!     Err(BakeryError::Validation(ValidationError::InvalidSize { .. })) => {
//!         println!("unknown size");
//!     }
//!     Err(e) => eprintln!("order failed: {}", e),
//! }
//! ```

use crate::core::order::CakeSize;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;

/// The main error type for order operations
#[derive(Debug, Error)]
pub enum BakeryError {
    /// Client input errors
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Order store errors
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// Reference image write errors
    #[error(transparent)]
    Upload(#[from] UploadError),
}

/// Error response body
///
/// `detail` is the field existing web clients read.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human-readable description of what went wrong
    pub detail: String,
    /// Error code for programmatic handling
    pub code: String,
}

impl BakeryError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            BakeryError::Validation(e) => e.status_code(),
            BakeryError::Storage(e) => e.status_code(),
            BakeryError::Upload(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            BakeryError::Validation(e) => e.error_code(),
            BakeryError::Storage(e) => e.error_code(),
            BakeryError::Upload(_) => "UPLOAD_WRITE_FAILED",
        }
    }

    /// Convert to an error response
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            detail: self.to_string(),
            code: self.error_code().to_string(),
        }
    }
}

impl IntoResponse for BakeryError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(code = self.error_code(), error = %self, "request failed");
        } else {
            tracing::debug!(code = self.error_code(), error = %self, "request rejected");
        }
        let body = Json(self.to_response());
        (status, body).into_response()
    }
}

// =============================================================================
// Validation Errors
// =============================================================================

/// Errors caused by the content of an order request
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Size missing or outside {small, medium, large}
    #[error("Size must be small, medium, or large")]
    InvalidSize { given: Option<String> },

    /// Layer count contradicts the size rule
    #[error("{} cakes must have exactly {required} layers", capitalized(.size))]
    InvalidLayers {
        size: CakeSize,
        required: u8,
        given: i64,
    },

    /// Layer count present but not an integer
    #[error("layers must be an integer, got '{value}'")]
    MalformedLayers { value: String },

    /// Required text field absent or empty
    #[error("{field} is required")]
    MissingField { field: String },

    /// The multipart body could not be read
    #[error("Malformed order form: {message}")]
    MalformedForm { message: String },

    /// The order form exceeds the configured body limit
    #[error("Order form too large: {message}")]
    PayloadTooLarge { message: String },

    /// Listing limit below one
    #[error("limit must be a positive integer, got {given}")]
    InvalidLimit { given: i64 },

    /// Query string could not be parsed
    #[error("Malformed query: {message}")]
    MalformedQuery { message: String },
}

impl ValidationError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ValidationError::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            _ => StatusCode::BAD_REQUEST,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            ValidationError::InvalidSize { .. } => "INVALID_SIZE",
            ValidationError::InvalidLayers { .. } => "INVALID_LAYERS",
            ValidationError::MalformedLayers { .. } => "INVALID_LAYERS",
            ValidationError::MissingField { .. } => "MISSING_FIELD",
            ValidationError::MalformedForm { .. } => "MALFORMED_FORM",
            ValidationError::PayloadTooLarge { .. } => "PAYLOAD_TOO_LARGE",
            ValidationError::InvalidLimit { .. } => "INVALID_LIMIT",
            ValidationError::MalformedQuery { .. } => "MALFORMED_QUERY",
        }
    }
}

fn capitalized(size: &CakeSize) -> String {
    let name = size.as_str();
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

// =============================================================================
// Storage Errors
// =============================================================================

/// Errors raised by order store backends
#[derive(Debug, Error)]
pub enum StorageError {
    /// The backend could not be reached or rejected the operation
    #[error("Storage backend '{backend}' is unavailable: {message}")]
    Unavailable { backend: String, message: String },

    /// A stored record could not be converted to or from its storage form
    #[error("Stored order could not be decoded: {message}")]
    Corrupted { message: String },
}

impl StorageError {
    /// Shorthand for [`StorageError::Unavailable`]
    pub fn unavailable(backend: &str, message: impl ToString) -> Self {
        StorageError::Unavailable {
            backend: backend.to_string(),
            message: message.to_string(),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            StorageError::Unavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            StorageError::Corrupted { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            StorageError::Unavailable { .. } => "STORE_UNAVAILABLE",
            StorageError::Corrupted { .. } => "STORAGE_ERROR",
        }
    }
}

// =============================================================================
// Upload Errors
// =============================================================================

/// Errors raised while persisting a reference image
#[derive(Debug, Error)]
pub enum UploadError {
    /// The uploads directory could not be created
    #[error("Failed to prepare uploads directory {}: {source}", .path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The image bytes could not be written
    #[error("Failed to write reference image {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
