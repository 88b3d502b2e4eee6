//! Response encoding and error mapping.
//!
//! # Responsibilities
//! - Encode handler results as JSON with the right content type
//! - Map handler failures to HTTP status codes
//! - Log every failure once, at the point it becomes a response
//!
//! # Status Mapping
//! - list fetch failure → 400 Bad Request
//! - JSON encoding failure → 500 with a short message
//! - insert/update/delete store failure, missing description marker
//!   → request aborted with an empty 500

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::store::StoreError;

/// Body sent when a result cannot be encoded.
pub const ENCODE_FAILURE_BODY: &str = "Failed to encode JSON";

/// Errors produced while handling a product request.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Listing rows from the store failed.
    #[error("Failed to fetch products: {0}")]
    Fetch(#[source] StoreError),

    /// A mutating store call failed.
    #[error("Store operation failed: {0}")]
    Store(#[from] StoreError),

    /// The description segment lacks its `d=` marker.
    #[error("Description segment '{0}' is missing its marker")]
    MissingMarker(String),

    /// The response body could not be serialized.
    #[error("Failed to encode JSON: {0}")]
    Encode(#[from] serde_json::Error),
}

impl ApiError {
    /// HTTP status reported for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Fetch(_) => StatusCode::BAD_REQUEST,
            ApiError::Store(_) | ApiError::MissingMarker(_) | ApiError::Encode(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            ApiError::Fetch(e) => {
                tracing::warn!(error = %e, "Failed to fetch products");
                status.into_response()
            }
            ApiError::Encode(e) => {
                tracing::error!(error = %e, "Error encoding JSON");
                (status, ENCODE_FAILURE_BODY).into_response()
            }
            ApiError::Store(e) => {
                tracing::error!(error = %e, "Store operation failed, aborting request");
                status.into_response()
            }
            ApiError::MissingMarker(raw) => {
                tracing::error!(description = %raw, "Description marker missing, aborting request");
                status.into_response()
            }
        }
    }
}

/// Serialize `value` into a 200 JSON response.
pub fn json_response<T: Serialize + ?Sized>(value: &T) -> Result<Response, ApiError> {
    let body = serde_json::to_vec(value)?;
    Ok((
        [(header::CONTENT_TYPE, HeaderValue::from_static("application/json"))],
        body,
    )
        .into_response())
}
