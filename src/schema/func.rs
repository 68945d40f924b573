//! Closure-backed schemas.
//!
//! [`SchemaFn`] wraps a synchronous validation closure and always yields an
//! immediate outcome. [`AsyncSchemaFn`] wraps a closure returning a future and
//! always yields a deferred one.

use std::future::Future;
use std::marker::PhantomData;

use serde_json::Value;

use super::traits::{SchemaOutcome, StandardResult, StandardSchema};

/// Vendor name reported by closure-backed schemas unless overridden.
pub const DEFAULT_VENDOR: &str = "stins";

/// A schema backed by a synchronous closure.
///
/// # Example
///
/// ```rust
/// use serde_json::json;
/// use stins::{validate_sync, Issue, Schema, StandardResult};
///
/// let schema = Schema::from_fn(|value| match value.as_str() {
///     Some(s) => StandardResult::Value(s.to_string()),
///     None => StandardResult::issues([Issue::new("Expected string")]),
/// });
///
/// let result = validate_sync(&schema, &json!("hello")).unwrap();
/// assert!(result.is_success());
/// ```
pub struct SchemaFn<F, T> {
    validator: F,
    vendor: String,
    _output: PhantomData<fn() -> T>,
}

impl<F, T> SchemaFn<F, T>
where
    F: Fn(&Value) -> StandardResult<T> + Send + Sync,
{
    /// Creates a schema from a closure.
    pub fn new(validator: F) -> Self {
        Self {
            validator,
            vendor: DEFAULT_VENDOR.to_string(),
            _output: PhantomData,
        }
    }

    /// Sets the vendor name reported by this schema.
    pub fn with_vendor(mut self, vendor: impl Into<String>) -> Self {
        self.vendor = vendor.into();
        self
    }
}

impl<F, T> StandardSchema for SchemaFn<F, T>
where
    F: Fn(&Value) -> StandardResult<T> + Send + Sync,
{
    type Output = T;

    fn vendor(&self) -> &str {
        &self.vendor
    }

    fn validate<'a>(&'a self, value: &'a Value) -> SchemaOutcome<'a, T> {
        SchemaOutcome::Immediate((self.validator)(value))
    }
}

/// A schema backed by a closure returning a future.
///
/// The closure receives its own copy of the input so the returned future can
/// be `'static`. Invoking this schema never completes synchronously.
pub struct AsyncSchemaFn<F, T> {
    validator: F,
    vendor: String,
    _output: PhantomData<fn() -> T>,
}

impl<F, Fut, T> AsyncSchemaFn<F, T>
where
    F: Fn(Value) -> Fut + Send + Sync,
    Fut: Future<Output = StandardResult<T>> + Send + 'static,
{
    /// Creates a schema from an async closure.
    pub fn new(validator: F) -> Self {
        Self {
            validator,
            vendor: DEFAULT_VENDOR.to_string(),
            _output: PhantomData,
        }
    }

    /// Sets the vendor name reported by this schema.
    pub fn with_vendor(mut self, vendor: impl Into<String>) -> Self {
        self.vendor = vendor.into();
        self
    }
}

impl<F, Fut, T> StandardSchema for AsyncSchemaFn<F, T>
where
    F: Fn(Value) -> Fut + Send + Sync,
    Fut: Future<Output = StandardResult<T>> + Send + 'static,
{
    type Output = T;

    fn vendor(&self) -> &str {
        &self.vendor
    }

    fn validate<'a>(&'a self, value: &'a Value) -> SchemaOutcome<'a, T> {
        SchemaOutcome::Deferred(Box::pin((self.validator)(value.clone())))
    }
}
