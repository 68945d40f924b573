//! Framework adapters.
//!
//! Each adapter is a thin translation layer over
//! [`middleware::core`](crate::middleware::core): it extracts the request
//! data the builders need and converts the resulting
//! [`MiddlewareResponse`](crate::MiddlewareResponse) into the framework's own
//! response type.
//!
//! | Adapter | Feature | Shape |
//! |---------|---------|-------|
//! | [`http`] | always | plain functions over `http::Request` |
//! | [`chain`] | always | callback chain with thrown errors |
//! | `axum` | `axum` | fallback, error and panic handlers, extractor |
//! | `tower` | `tower` | body validation layer and error layer |
//! | `hyper` | `hyper` | helpers for `service_fn` handlers |

#[cfg(feature = "axum")]
pub mod axum;
#[cfg(any(feature = "tower", feature = "hyper"))]
mod body;
pub mod chain;
pub mod http;
#[cfg(feature = "hyper")]
pub mod hyper;
#[cfg(feature = "tower")]
pub mod tower;

#[cfg(any(feature = "tower", feature = "hyper"))]
pub use body::{BodyError, DEFAULT_BODY_LIMIT};

use thiserror::Error;

#[cfg(any(feature = "tower", feature = "hyper"))]
use crate::error::AsyncSchemaError;
#[cfg(any(feature = "tower", feature = "hyper"))]
use crate::middleware::core::{create_error_response, Thrown};
#[cfg(any(feature = "tower", feature = "hyper"))]
use crate::middleware::types::{ErrorHandlerOptions, MiddlewareResponse};

/// Boxed error type accepted from inner services and body streams.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Validated request data, stored in request extensions by the body
/// validation layers and read back by handlers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Validated<T>(pub T);

impl<T> Validated<T> {
    /// Unwraps the validated data.
    pub fn into_inner(self) -> T {
        self.0
    }
}

/// A handler asked for validated data that no layer stored.
#[derive(Debug, Clone, Copy, Error)]
#[error("validated data missing from request extensions")]
pub struct MissingValidatedData;

/// The 500 response for a deferring schema behind a synchronous adapter.
#[cfg(any(feature = "tower", feature = "hyper"))]
pub(crate) fn misconfigured(err: &AsyncSchemaError) -> MiddlewareResponse {
    tracing::error!(error = %err, "deferring schema used with synchronous validation");
    create_error_response(Thrown::Error(err), &ErrorHandlerOptions::new())
}
