//! Callback-chain middleware.
//!
//! Each middleware receives a context and a `next` continuation and either
//! calls `next` or fails with a [`ChainError`]. Validation reads the
//! context's `data`, falling back to `input`, and hands the validated value
//! to `next` as [`ValidatedContext::validated_data`].
//!
//! ```rust
//! use serde_json::json;
//! use stins::middleware::adapters::chain::{ChainContext, ValidationMiddleware};
//! use stins::{Schema, StandardResult, ValidationOptions};
//!
//! let middleware = ValidationMiddleware::new(
//!     Schema::from_fn(|value| StandardResult::Value(value.clone())),
//!     ValidationOptions::new(),
//! );
//!
//! let ctx = ChainContext::with_data(json!({"name": "Ada"}));
//! let name = futures::executor::block_on(middleware.server(ctx, |ctx| async move {
//!     Ok(ctx.validated_data["name"].clone())
//! }))
//! .unwrap();
//!
//! assert_eq!(name, "Ada");
//! ```

use std::future::Future;

use serde_json::Value;
use thiserror::Error;

use crate::error::AsyncSchemaError;
use crate::middleware::core::{create_error_response, validate_request, validate_request_sync};
use crate::middleware::types::{
    ErrorHandlerOptions, MiddlewareResponse, MiddlewareResponseBody, ValidationOptions,
    ValidationResponse,
};
use crate::schema::StandardSchema;
use crate::status::StatusCode;

/// Failure raised inside a middleware chain. Displays as the body's message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", .body.message)]
pub struct ChainError {
    /// Response status.
    pub status: StatusCode,
    /// Response body.
    pub body: MiddlewareResponseBody,
}

impl ChainError {
    /// The error as a response.
    pub fn into_response(self) -> MiddlewareResponse {
        MiddlewareResponse::new(self.status, self.body)
    }
}

impl From<MiddlewareResponse> for ChainError {
    fn from(response: MiddlewareResponse) -> Self {
        Self {
            status: response.status,
            body: response.body,
        }
    }
}

/// Request context handed to a validation middleware.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChainContext {
    /// Request data. Preferred when present and not `null`.
    pub data: Option<Value>,
    /// Raw input, used when `data` is absent or `null`.
    pub input: Option<Value>,
}

impl ChainContext {
    /// A context carrying `data`.
    pub fn with_data(data: Value) -> Self {
        Self {
            data: Some(data),
            input: None,
        }
    }

    /// A context carrying `input`.
    pub fn with_input(input: Value) -> Self {
        Self {
            data: None,
            input: Some(input),
        }
    }

    fn into_payload(self) -> Value {
        self.data
            .filter(|data| !data.is_null())
            .or(self.input)
            .unwrap_or(Value::Null)
    }
}

/// Context passed to `next` after successful validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedContext<T> {
    /// The schema's output.
    pub validated_data: T,
}

/// Validation step of a chain.
#[derive(Debug, Clone)]
pub struct ValidationMiddleware<S> {
    schema: S,
    options: ValidationOptions,
}

impl<S> ValidationMiddleware<S>
where
    S: StandardSchema,
{
    /// Creates the middleware.
    pub fn new(schema: S, options: ValidationOptions) -> Self {
        Self { schema, options }
    }

    /// Validates the context payload and continues with `next` on success.
    ///
    /// # Errors
    ///
    /// Returns a [`ChainError`] carrying the validation failure response, or
    /// whatever error `next` fails with.
    pub async fn server<N, Fut, R>(&self, ctx: ChainContext, next: N) -> Result<R, ChainError>
    where
        N: FnOnce(ValidatedContext<S::Output>) -> Fut,
        Fut: Future<Output = Result<R, ChainError>>,
    {
        let payload = ctx.into_payload();
        match validate_request(&self.schema, &payload, &self.options).await {
            ValidationResponse::Success { data } => next(ValidatedContext { validated_data: data }).await,
            ValidationResponse::Failure { status, body } => Err(ChainError { status, body }),
        }
    }
}

/// Creates a [`ValidationMiddleware`].
pub fn create_validation_middleware<S>(schema: S, options: ValidationOptions) -> ValidationMiddleware<S>
where
    S: StandardSchema,
{
    ValidationMiddleware::new(schema, options)
}

/// Error step of a chain. Converts whatever `next` fails with into a
/// [`ChainError`] built by [`create_error_response`]. A [`ChainError`] is
/// passed through unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct ErrorMiddleware {
    options: ErrorHandlerOptions,
}

impl ErrorMiddleware {
    /// Creates the middleware.
    pub fn new(options: ErrorHandlerOptions) -> Self {
        Self { options }
    }

    /// Runs `next`, converting its failure into an error response.
    ///
    /// A [`ChainError`] raised further down, such as a validation failure,
    /// keeps its status and body.
    pub async fn server<N, Fut, R, E>(&self, next: N) -> Result<R, ChainError>
    where
        N: FnOnce() -> Fut,
        Fut: Future<Output = Result<R, E>>,
        E: Into<anyhow::Error>,
    {
        next().await.map_err(|err| {
            let report: anyhow::Error = err.into();
            match report.downcast::<ChainError>() {
                Ok(chain_error) => chain_error,
                Err(report) => create_error_response(&report, &self.options).into(),
            }
        })
    }
}

/// Creates an [`ErrorMiddleware`].
pub fn create_error_middleware(options: ErrorHandlerOptions) -> ErrorMiddleware {
    ErrorMiddleware::new(options)
}

/// Validates a body, awaiting the schema if it defers.
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

/// Validates a body without suspending.
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
