//! Request body extraction shared by the tower and hyper adapters.

use bytes::Bytes;
use http_body::Body;
use http_body_util::{BodyExt, LengthLimitError, Limited};
use serde_json::Value;
use thiserror::Error;

use super::BoxError;
use crate::middleware::core::{create_error_response, Thrown};
use crate::middleware::types::{ErrorHandlerOptions, MiddlewareResponse};
use crate::status::StatusCode;

/// Largest body read by default, matching axum's `DefaultBodyLimit`.
pub const DEFAULT_BODY_LIMIT: usize = 2 * 1024 * 1024;

/// A request body that could not be turned into a JSON value.
#[derive(Debug, Error)]
pub enum BodyError {
    /// The body is longer than the configured limit.
    #[error("request body exceeds {limit} bytes")]
    TooLarge {
        /// The limit in bytes.
        limit: usize,
    },
    /// The body stream failed.
    #[error("failed to read request body: {0}")]
    Read(#[source] BoxError),
    /// The body is not valid JSON.
    #[error("malformed JSON body: {0}")]
    Json(#[from] serde_json::Error),
}

impl BodyError {
    /// The response sent for this error: 413 for an oversized body, 400
    /// otherwise. Stack renderings are never included since the error
    /// describes client input.
    pub fn to_response(&self) -> MiddlewareResponse {
        let status = match self {
            BodyError::TooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            BodyError::Read(_) | BodyError::Json(_) => StatusCode::BAD_REQUEST,
        };
        let options = ErrorHandlerOptions::new()
            .default_status(status)
            .include_stack(false);
        create_error_response(Thrown::Error(self), &options)
    }
}

/// Collects at most `limit` bytes of `body` and parses them as JSON. An empty
/// body reads as `null`.
pub(crate) async fn read_json<B>(body: B, limit: usize) -> Result<(Bytes, Value), BodyError>
where
    B: Body,
    B::Error: Into<BoxError>,
{
    let bytes = Limited::new(body, limit)
        .collect()
        .await
        .map_err(|err| {
            if err.downcast_ref::<LengthLimitError>().is_some() {
                BodyError::TooLarge { limit }
            } else {
                BodyError::Read(err)
            }
        })?
        .to_bytes();

    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok((bytes, Value::Null));
    }

    let value = serde_json::from_slice(&bytes)?;
    Ok((bytes, value))
}
