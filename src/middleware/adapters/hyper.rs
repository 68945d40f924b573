//! Helpers for handlers served with `hyper::service::service_fn`.
//!
//! Responses are `Response<Full<Bytes>>`. Body validation consumes the
//! request and returns its parts with the validated output, or a response to
//! send back as is.
//!
//! ```rust,no_run
//! use std::convert::Infallible;
//!
//! use bytes::Bytes;
//! use http_body_util::Full;
//! use hyper::{Request, Response};
//! use serde_json::Value;
//! use stins::middleware::adapters::hyper::{validate_body, HyperResponse};
//! use stins::{Schema, StandardResult, ValidationOptions};
//!
//! async fn create_user(req: Request<Full<Bytes>>) -> Result<HyperResponse, Infallible> {
//!     let schema = Schema::from_fn(|value: &Value| StandardResult::Value(value.clone()));
//!     let (_parts, user) = match validate_body(&schema, req, &ValidationOptions::new()).await {
//!         Ok(validated) => validated,
//!         Err(rejection) => return Ok(rejection),
//!     };
//!     Ok(Response::new(user.to_string().into()))
//! }
//! ```

use std::error::Error as StdError;

use bytes::Bytes;
use http::request::Parts;
use http_body::Body;
use http_body_util::Full;
use hyper::{Request, Response};
use tracing::trace;

use super::body::{read_json, DEFAULT_BODY_LIMIT};
use super::http::into_response;
use super::{misconfigured, BoxError};
use crate::middleware::core::{
    create_error_response, create_not_found_response, validate_request, validate_request_sync,
    Thrown,
};
use crate::middleware::types::{ErrorHandlerOptions, ValidationOptions, ValidationResponse};
use crate::schema::StandardSchema;

/// Response type produced by this adapter.
pub type HyperResponse = Response<Full<Bytes>>;

/// 404 response for an unmatched request.
pub fn not_found<B>(req: &Request<B>) -> HyperResponse {
    into_response(&create_not_found_response(req.uri().path()))
}

/// Error response for an error a handler failed with.
pub fn on_error(err: &(dyn StdError + 'static), options: &ErrorHandlerOptions) -> HyperResponse {
    into_response(&create_error_response(Thrown::Error(err), options))
}

/// Reads and validates a JSON body, awaiting the schema if it defers.
///
/// # Errors
///
/// Returns the response to send when the body is unreadable, is longer than
/// [`DEFAULT_BODY_LIMIT`] (413), is not JSON, or fails validation.
pub async fn validate_body<S, B>(
    schema: &S,
    req: Request<B>,
    options: &ValidationOptions,
) -> Result<(Parts, S::Output), HyperResponse>
where
    S: StandardSchema + ?Sized,
    B: Body,
    B::Error: Into<BoxError>,
{
    let (parts, body) = req.into_parts();
    trace!(method = %parts.method, uri = %parts.uri, "validating request body");
    let (_, value) = read_json(body, DEFAULT_BODY_LIMIT)
        .await
        .map_err(|err| into_response(&err.to_response()))?;

    finish(parts, validate_request(schema, &value, options).await)
}

/// Reads a JSON body and validates it without awaiting the schema.
///
/// # Errors
///
/// As [`validate_body`]. A schema that defers yields a 500 response carrying
/// the [`AsyncSchemaError`](crate::AsyncSchemaError) message.
pub async fn validate_body_sync<S, B>(
    schema: &S,
    req: Request<B>,
    options: &ValidationOptions,
) -> Result<(Parts, S::Output), HyperResponse>
where
    S: StandardSchema + ?Sized,
    B: Body,
    B::Error: Into<BoxError>,
{
    let (parts, body) = req.into_parts();
    trace!(method = %parts.method, uri = %parts.uri, "validating request body");
    let (_, value) = read_json(body, DEFAULT_BODY_LIMIT)
        .await
        .map_err(|err| into_response(&err.to_response()))?;

    let outcome = validate_request_sync(schema, &value, options)
        .map_err(|err| into_response(&misconfigured(&err)))?;
    finish(parts, outcome)
}

fn finish<T>(parts: Parts, outcome: ValidationResponse<T>) -> Result<(Parts, T), HyperResponse> {
    outcome
        .into_result()
        .map(|data| (parts, data))
        .map_err(|response| into_response(&response))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Issue;
    use crate::path::IssuePath;
    use crate::schema::{Schema, StandardResult};
    use crate::status::StatusCode;
    use http_body_util::BodyExt;
    use hyper::service::{service_fn, Service};
    use serde_json::{json, Value};
    use std::convert::Infallible;

    fn age_schema() -> impl StandardSchema<Output = u64> {
        Schema::from_fn(|value| match value.get("age").and_then(Value::as_u64) {
            Some(age) => StandardResult::Value(age),
            None => StandardResult::issues([Issue::at(IssuePath::from_field("age"), "Expected number")]),
        })
    }

    async fn handler(req: Request<Full<Bytes>>) -> Result<HyperResponse, Infallible> {
        if req.uri().path() != "/age" {
            return Ok(not_found(&req));
        }
        match validate_body(&age_schema(), req, &ValidationOptions::new()).await {
            Ok((_, age)) => Ok(Response::new(Full::new(Bytes::from(age.to_string())))),
            Err(rejection) => Ok(rejection),
        }
    }

    fn post(path: &str, body: &'static str) -> Request<Full<Bytes>> {
        Request::post(path)
            .body(Full::new(Bytes::from_static(body.as_bytes())))
            .unwrap()
    }

    async fn body_bytes(res: HyperResponse) -> Bytes {
        res.into_body().collect().await.unwrap().to_bytes()
    }

    #[tokio::test]
    async fn test_service_fn_validates_body() {
        let svc = service_fn(handler);

        let res = svc.call(post("/age", r#"{"age": 30}"#)).await.unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(&body_bytes(res).await[..], b"30");

        let res = svc.call(post("/age", r#"{"age": "old"}"#)).await.unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: Value = serde_json::from_slice(&body_bytes(res).await).unwrap();
        assert_eq!(body["errors"], json!([{"message": "Expected number", "path": "age"}]));
    }

    #[tokio::test]
    async fn test_service_fn_not_found() {
        let res = service_fn(handler).call(post("/nope", "")).await.unwrap();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
        let body: Value = serde_json::from_slice(&body_bytes(res).await).unwrap();
        assert_eq!(body, json!({"message": "Not Found: /nope"}));
    }

    #[tokio::test]
    async fn test_sync_rejects_deferred_schema() {
        let schema = Schema::from_async_fn(|value| async move { StandardResult::Value(value) });
        let rejection = validate_body_sync(&schema, post("/", "{}"), &ValidationOptions::new())
            .await
            .unwrap_err();
        assert_eq!(rejection.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_on_error() {
        let err = std::io::Error::other("disk full");
        let res = on_error(&err, &ErrorHandlerOptions::new().default_status(StatusCode::INSUFFICIENT_STORAGE));
        assert_eq!(res.status(), StatusCode::INSUFFICIENT_STORAGE);
    }
}
