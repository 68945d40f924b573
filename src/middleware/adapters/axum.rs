//! axum integration.
//!
//! - [`MiddlewareResponse`] implements [`IntoResponse`].
//! - [`not_found`] is a `Router::fallback` handler.
//! - [`on_error`] builds a `HandleErrorLayer` callback and [`on_panic`] a
//!   `CatchPanicLayer::custom` callback.
//! - [`Validated`] extracts the output stored by
//!   [`ValidateBodyLayer`](super::tower::ValidateBodyLayer), which is added
//!   with `Router::route_layer`.
//!
//! ```rust,no_run
//! use axum::routing::post;
//! use axum::Router;
//! use serde_json::Value;
//! use stins::middleware::adapters::axum::not_found;
//! use stins::middleware::adapters::tower::ValidateBodyLayer;
//! use stins::{Schema, StandardResult, Validated, ValidationOptions};
//!
//! async fn create_user(Validated(user): Validated<Value>) -> String {
//!     user.to_string()
//! }
//!
//! let schema = Schema::from_fn(|value: &Value| StandardResult::Value(value.clone()));
//! let app: Router = Router::new()
//!     .route("/users", post(create_user))
//!     .route_layer(ValidateBodyLayer::new(schema, ValidationOptions::new()))
//!     .fallback(not_found);
//! ```

use std::any::Any;
use std::future::{ready, Ready};

use axum::extract::{FromRequestParts, OriginalUri};
use axum::http::request::Parts;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::Value;

use super::{misconfigured, BoxError, MissingValidatedData, Validated};
use crate::middleware::core::{
    create_error_response, create_not_found_response, validate_request, validate_request_sync,
    Thrown,
};
use crate::middleware::types::{ErrorHandlerOptions, MiddlewareResponse, ValidationOptions};
use crate::schema::StandardSchema;

impl IntoResponse for MiddlewareResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

/// Fallback handler answering with 404 and the full request path.
pub async fn not_found(OriginalUri(uri): OriginalUri) -> Response {
    tracing::trace!(%uri, "no route matched");
    create_not_found_response(uri.path()).into_response()
}

/// Callback for `HandleErrorLayer` turning service errors into responses.
pub fn on_error(
    options: ErrorHandlerOptions,
) -> impl Fn(BoxError) -> Ready<Response> + Clone + Send + Sync + 'static {
    move |err: BoxError| ready(create_error_response(Thrown::Error(&*err), &options).into_response())
}

/// Callback for `CatchPanicLayer::custom` turning panics into responses.
///
/// Panic payloads are never echoed: the body carries the generic
/// `"Internal Server Error"` message.
pub fn on_panic(
    options: ErrorHandlerOptions,
) -> impl Fn(Box<dyn Any + Send + 'static>) -> Response + Clone + Send + Sync + 'static {
    move |payload: Box<dyn Any + Send + 'static>| {
        create_error_response(Thrown::Panic(payload.as_ref()), &options).into_response()
    }
}

/// Validates a value inside a handler, awaiting the schema if it defers.
///
/// # Errors
///
/// Returns the failure response, ready to be returned from the handler.
pub async fn validation_hook<S>(
    schema: &S,
    value: &Value,
    options: &ValidationOptions,
) -> Result<S::Output, Response>
where
    S: StandardSchema + ?Sized,
{
    validate_request(schema, value, options)
        .await
        .into_result()
        .map_err(IntoResponse::into_response)
}

/// Validates a value inside a handler without awaiting the schema.
///
/// # Errors
///
/// Returns the failure response. A schema that defers yields a 500 carrying
/// the [`AsyncSchemaError`](crate::AsyncSchemaError) message.
pub fn validation_hook_sync<S>(
    schema: &S,
    value: &Value,
    options: &ValidationOptions,
) -> Result<S::Output, Response>
where
    S: StandardSchema + ?Sized,
{
    validate_request_sync(schema, value, options)
        .map_err(|err| misconfigured(&err).into_response())?
        .into_result()
        .map_err(IntoResponse::into_response)
}

impl<S, T> FromRequestParts<S> for Validated<T>
where
    S: Send + Sync,
    T: Clone + Send + Sync + 'static,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts.extensions.get::<Validated<T>>().cloned().ok_or_else(|| {
            tracing::error!(
                output = std::any::type_name::<T>(),
                "no validated data in request extensions"
            );
            create_error_response(Thrown::Error(&MissingValidatedData), &ErrorHandlerOptions::new())
                .into_response()
        })
    }
}
