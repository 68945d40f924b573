//! Tower layers.
//!
//! - [`ValidateBodyLayer`] reads the JSON body, validates it and stores the
//!   output as [`Validated`] in the request extensions before calling the
//!   inner service. Failures short-circuit with a response.
//! - [`CatchErrorLayer`] turns errors from the inner service into error
//!   responses, leaving the stack infallible.
//! - [`NotFound`] is a terminal service answering every request with 404.
//!
//! ```rust,no_run
//! use serde_json::Value;
//! use stins::middleware::adapters::tower::ValidateBodyLayer;
//! use stins::{Schema, StandardResult, ValidationOptions};
//! use tower::ServiceBuilder;
//!
//! let schema = Schema::from_fn(|value: &Value| StandardResult::Value(value.clone()));
//! let layer = ServiceBuilder::new().layer(ValidateBodyLayer::new(schema, ValidationOptions::new()));
//! # let _ = layer;
//! ```

use std::convert::Infallible;
use std::fmt;
use std::future::{ready, Ready};
use std::marker::PhantomData;
use std::sync::Arc;
use std::task::{Context, Poll};

use bytes::Bytes;
use futures::future::BoxFuture;
use http::{Request, Response};
use http_body::Body;
use tower::{Layer, Service, ServiceExt};
use tracing::trace;

use super::body::{read_json, DEFAULT_BODY_LIMIT};
use super::http::{into_response, not_found};
use super::{misconfigured, BoxError, Validated};
use crate::middleware::core::{create_error_response, validate_request, validate_request_sync, Thrown};
use crate::middleware::types::{ErrorHandlerOptions, ValidationOptions};
use crate::schema::StandardSchema;

/// Whether the schema may defer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Async,
    Sync,
}

/// Layer validating JSON request bodies. See the [module docs](self).
pub struct ValidateBodyLayer<S> {
    schema: Arc<S>,
    options: ValidationOptions,
    mode: Mode,
    limit: usize,
}

impl<S> ValidateBodyLayer<S> {
    /// Validates bodies, awaiting the schema if it defers.
    pub fn new(schema: S, options: ValidationOptions) -> Self {
        Self {
            schema: Arc::new(schema),
            options,
            mode: Mode::Async,
            limit: DEFAULT_BODY_LIMIT,
        }
    }

    /// Validates bodies without awaiting the schema.
    ///
    /// A schema that defers is a configuration error and every request is
    /// answered with a 500 carrying [`AsyncSchemaError::ValidateRequest`](crate::AsyncSchemaError::ValidateRequest).
    pub fn sync(schema: S, options: ValidationOptions) -> Self {
        Self {
            mode: Mode::Sync,
            ..Self::new(schema, options)
        }
    }

    /// Sets the largest body read, [`DEFAULT_BODY_LIMIT`] unless changed.
    /// Longer bodies are answered with a 413.
    pub fn body_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }
}

impl<S> Clone for ValidateBodyLayer<S> {
    fn clone(&self) -> Self {
        Self {
            schema: Arc::clone(&self.schema),
            options: self.options,
            mode: self.mode,
            limit: self.limit,
        }
    }
}

impl<S> fmt::Debug for ValidateBodyLayer<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidateBodyLayer")
            .field("options", &self.options)
            .field("mode", &self.mode)
            .field("limit", &self.limit)
            .finish_non_exhaustive()
    }
}

impl<S, Inner> Layer<Inner> for ValidateBodyLayer<S> {
    type Service = ValidateBody<S, Inner>;

    fn layer(&self, inner: Inner) -> Self::Service {
        ValidateBody {
            inner,
            schema: Arc::clone(&self.schema),
            options: self.options,
            mode: self.mode,
            limit: self.limit,
        }
    }
}

/// Service produced by [`ValidateBodyLayer`].
pub struct ValidateBody<S, Inner> {
    inner: Inner,
    schema: Arc<S>,
    options: ValidationOptions,
    mode: Mode,
    limit: usize,
}

impl<S, Inner: Clone> Clone for ValidateBody<S, Inner> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            schema: Arc::clone(&self.schema),
            options: self.options,
            mode: self.mode,
            limit: self.limit,
        }
    }
}

impl<S, Inner: fmt::Debug> fmt::Debug for ValidateBody<S, Inner> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidateBody")
            .field("inner", &self.inner)
            .field("options", &self.options)
            .field("mode", &self.mode)
            .field("limit", &self.limit)
            .finish_non_exhaustive()
    }
}

impl<S, Inner, ReqBody, ResBody> Service<Request<ReqBody>> for ValidateBody<S, Inner>
where
    S: StandardSchema + 'static,
    S::Output: Clone + Send + Sync + 'static,
    Inner: Service<Request<ReqBody>, Response = Response<ResBody>> + Clone + Send + 'static,
    Inner::Future: Send,
    ReqBody: Body + From<Bytes> + Send + 'static,
    ReqBody::Data: Send,
    ReqBody::Error: Into<BoxError>,
    ResBody: From<Bytes> + Send + 'static,
{
    type Response = Response<ResBody>;
    type Error = Inner::Error;
    type Future = BoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        // The inner service is driven with `oneshot` on a clone.
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: Request<ReqBody>) -> Self::Future {
        let inner = self.inner.clone();
        let schema = Arc::clone(&self.schema);
        let options = self.options;
        let mode = self.mode;
        let limit = self.limit;

        Box::pin(async move {
            let (parts, body) = req.into_parts();
            trace!(method = %parts.method, uri = %parts.uri, ?mode, "validating request body");
            let (bytes, value) = match read_json(body, limit).await {
                Ok(read) => read,
                Err(err) => return Ok(into_response(&err.to_response())),
            };

            let outcome = match mode {
                Mode::Async => validate_request(&*schema, &value, &options).await,
                Mode::Sync => match validate_request_sync(&*schema, &value, &options) {
                    Ok(outcome) => outcome,
                    Err(err) => return Ok(into_response(&misconfigured(&err))),
                },
            };

            match outcome.into_result() {
                Ok(data) => {
                    let mut req = Request::from_parts(parts, ReqBody::from(bytes));
                    req.extensions_mut().insert(Validated(data));
                    inner.oneshot(req).await
                }
                Err(response) => Ok(into_response(&response)),
            }
        })
    }
}

/// Layer converting inner service errors into error responses.
#[derive(Debug, Clone, Copy, Default)]
pub struct CatchErrorLayer {
    options: ErrorHandlerOptions,
}

impl CatchErrorLayer {
    /// Creates the layer.
    pub fn new(options: ErrorHandlerOptions) -> Self {
        Self { options }
    }
}

impl<Inner> Layer<Inner> for CatchErrorLayer {
    type Service = CatchError<Inner>;

    fn layer(&self, inner: Inner) -> Self::Service {
        CatchError {
            inner,
            options: self.options,
        }
    }
}

/// Service produced by [`CatchErrorLayer`].
#[derive(Debug, Clone)]
pub struct CatchError<Inner> {
    inner: Inner,
    options: ErrorHandlerOptions,
}

impl<Inner, ReqBody, ResBody> Service<Request<ReqBody>> for CatchError<Inner>
where
    Inner: Service<Request<ReqBody>, Response = Response<ResBody>> + Clone + Send + 'static,
    Inner::Error: Into<BoxError>,
    Inner::Future: Send,
    ReqBody: Send + 'static,
    ResBody: From<Bytes> + Send + 'static,
{
    type Response = Response<ResBody>;
    type Error = Infallible;
    type Future = BoxFuture<'static, Result<Self::Response, Infallible>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Infallible>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: Request<ReqBody>) -> Self::Future {
        let inner = self.inner.clone();
        let options = self.options;

        Box::pin(async move {
            match inner.oneshot(req).await {
                Ok(res) => Ok(res),
                Err(err) => {
                    let err: BoxError = err.into();
                    Ok(into_response(&create_error_response(Thrown::Error(&*err), &options)))
                }
            }
        })
    }
}

/// Terminal service answering every request with a 404 response.
pub struct NotFound<ResBody> {
    _body: PhantomData<fn() -> ResBody>,
}

impl<ResBody> NotFound<ResBody> {
    /// Creates the service.
    pub fn new() -> Self {
        Self { _body: PhantomData }
    }
}

impl<ResBody> Default for NotFound<ResBody> {
    fn default() -> Self {
        Self::new()
    }
}

impl<ResBody> Clone for NotFound<ResBody> {
    fn clone(&self) -> Self {
        Self::new()
    }
}

impl<ResBody> fmt::Debug for NotFound<ResBody> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("NotFound")
    }
}

impl<ReqBody, ResBody> Service<Request<ReqBody>> for NotFound<ResBody>
where
    ResBody: From<Bytes>,
{
    type Response = Response<ResBody>;
    type Error = Infallible;
    type Future = Ready<Result<Self::Response, Infallible>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Infallible>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: Request<ReqBody>) -> Self::Future {
        ready(Ok(into_response(&not_found(&req))))
    }
}
