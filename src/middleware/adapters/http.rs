//! Plain functions over the `http` crate's request and response types.
//!
//! This adapter carries no framework runtime. Handlers call the functions
//! directly and either return the [`MiddlewareResponse`] as data or convert
//! it with [`into_response`].

use bytes::Bytes;
use http::header::{HeaderValue, CONTENT_TYPE};
use http::{Request, Response};
use serde_json::Value;

use crate::error::AsyncSchemaError;
use crate::middleware::core::{
    create_error_response, create_not_found_response, validate_request, validate_request_sync,
    Thrown,
};
use crate::middleware::types::{
    ErrorHandlerOptions, MiddlewareResponse, ValidationOptions, ValidationResponse,
};
use crate::schema::StandardSchema;

/// Content type of every response built by the adapters.
pub const APPLICATION_JSON: &str = "application/json";

/// Converts a [`MiddlewareResponse`] into an `http::Response` with a JSON body.
pub fn into_response<B>(response: &MiddlewareResponse) -> Response<B>
where
    B: From<Bytes>,
{
    let body = Bytes::from(response.body.to_json_vec());
    let mut res = Response::new(B::from(body));
    *res.status_mut() = response.status;
    res.headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static(APPLICATION_JSON));
    res
}

/// 404 response for an unmatched request.
pub fn not_found<B>(req: &Request<B>) -> MiddlewareResponse {
    create_not_found_response(req.uri().path())
}

/// Error response for anything a handler failed with.
pub fn on_error<'a>(thrown: impl Into<Thrown<'a>>, options: &ErrorHandlerOptions) -> MiddlewareResponse {
    create_error_response(thrown, options)
}

/// Validates a request body, awaiting the schema if it defers.
pub async fn validate_body<S>(
    schema: &S,
    body: &Value,
    options: &ValidationOptions,
) -> ValidationResponse<S::Output>
where
    S: StandardSchema + ?Sized,
{
    validate_request(schema, body, options).await
}

/// Validates a request body without suspending.
///
/// # Errors
///
/// Returns [`AsyncSchemaError::ValidateRequest`] if the schema deferred.
pub fn validate_body_sync<S>(
    schema: &S,
    body: &Value,
    options: &ValidationOptions,
) -> Result<ValidationResponse<S::Output>, AsyncSchemaError>
where
    S: StandardSchema + ?Sized,
{
    validate_request_sync(schema, body, options)
}
