//! The schema contract.
//!
//! This module provides the [`StandardSchema`] trait: any validator exposing a
//! single `validate` operation whose result is either available immediately or
//! deferred behind a future. Callers cannot know which without invoking it, so
//! the return type makes the distinction explicit with [`SchemaOutcome`].

use std::fmt;
use std::sync::Arc;

use futures::future::BoxFuture;
use serde_json::Value;
use stillwater::Validation;

use crate::error::{Issue, Issues};

/// The concrete result of a schema validation.
#[derive(Debug, Clone, PartialEq)]
pub enum StandardResult<T> {
    /// Validation succeeded and produced a typed output.
    Value(T),
    /// Validation failed. An empty list still means failure.
    Issues(Issues),
}

impl<T> StandardResult<T> {
    /// Creates a failed result from any collection of issues.
    pub fn issues(issues: impl IntoIterator<Item = Issue>) -> Self {
        StandardResult::Issues(issues.into_iter().collect())
    }

    /// Returns true if the schema accepted the input.
    pub fn is_value(&self) -> bool {
        matches!(self, StandardResult::Value(_))
    }

    /// Converts into the accumulating [`Validation`] type.
    pub fn into_validation(self) -> Validation<T, Issues> {
        match self {
            StandardResult::Value(value) => Validation::Success(value),
            StandardResult::Issues(issues) => Validation::Failure(issues),
        }
    }
}

/// What invoking a schema yields: a result in hand, or one still pending.
///
/// Synchronous entry points reject [`SchemaOutcome::Deferred`] without polling
/// it; asynchronous entry points await either variant uniformly.
pub enum SchemaOutcome<'a, T> {
    /// The schema completed without suspending.
    Immediate(StandardResult<T>),
    /// The schema needs to suspend before its result is available.
    Deferred(BoxFuture<'a, StandardResult<T>>),
}

impl<'a, T> SchemaOutcome<'a, T> {
    /// An immediate success.
    pub fn value(value: T) -> Self {
        SchemaOutcome::Immediate(StandardResult::Value(value))
    }

    /// An immediate failure.
    pub fn issues(issues: impl IntoIterator<Item = Issue>) -> Self {
        SchemaOutcome::Immediate(StandardResult::issues(issues))
    }

    /// Returns true if the result is still pending.
    pub fn is_deferred(&self) -> bool {
        matches!(self, SchemaOutcome::Deferred(_))
    }

    /// Returns the result if it is already available.
    pub fn into_immediate(self) -> Option<StandardResult<T>> {
        match self {
            SchemaOutcome::Immediate(result) => Some(result),
            SchemaOutcome::Deferred(_) => None,
        }
    }

    /// Waits for the result, whichever variant this is.
    pub async fn resolve(self) -> StandardResult<T> {
        match self {
            SchemaOutcome::Immediate(result) => result,
            SchemaOutcome::Deferred(pending) => pending.await,
        }
    }
}

impl<T> From<StandardResult<T>> for SchemaOutcome<'_, T> {
    fn from(result: StandardResult<T>) -> Self {
        SchemaOutcome::Immediate(result)
    }
}

impl<T: fmt::Debug> fmt::Debug for SchemaOutcome<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaOutcome::Immediate(result) => f.debug_tuple("Immediate").field(result).finish(),
            SchemaOutcome::Deferred(_) => f.write_str("Deferred(..)"),
        }
    }
}

/// A pluggable validator.
///
/// Implementations wrap a concrete validation library (or a closure) and
/// report either a typed output or the issues found. The `Send + Sync` bounds
/// allow schemas to be shared across request handlers.
///
/// # Example
///
/// ```rust
/// use serde_json::Value;
/// use stins::{Issue, SchemaOutcome, StandardSchema};
///
/// struct NonEmptyString;
///
/// impl StandardSchema for NonEmptyString {
///     type Output = String;
///
///     fn vendor(&self) -> &str {
///         "example"
///     }
///
///     fn validate<'a>(&'a self, value: &'a Value) -> SchemaOutcome<'a, String> {
///         match value.as_str() {
///             Some(s) if !s.is_empty() => SchemaOutcome::value(s.to_string()),
///             _ => SchemaOutcome::issues([Issue::new("Expected a non-empty string")]),
///         }
///     }
/// }
/// ```
pub trait StandardSchema: Send + Sync {
    /// The output type produced by successful validation.
    type Output;

    /// Name of the library providing this schema.
    fn vendor(&self) -> &str;

    /// Version of the schema contract. Always `1`.
    fn version(&self) -> u32 {
        1
    }

    /// Validates `value`, either immediately or after suspension.
    fn validate<'a>(&'a self, value: &'a Value) -> SchemaOutcome<'a, Self::Output>;
}

/// A type-erased schema producing JSON values.
pub type AnySchema = dyn StandardSchema<Output = Value>;

impl<S: StandardSchema + ?Sized> StandardSchema for &S {
    type Output = S::Output;

    fn vendor(&self) -> &str {
        (**self).vendor()
    }

    fn version(&self) -> u32 {
        (**self).version()
    }

    fn validate<'a>(&'a self, value: &'a Value) -> SchemaOutcome<'a, Self::Output> {
        (**self).validate(value)
    }
}

impl<S: StandardSchema + ?Sized> StandardSchema for Box<S> {
    type Output = S::Output;

    fn vendor(&self) -> &str {
        (**self).vendor()
    }

    fn version(&self) -> u32 {
        (**self).version()
    }

    fn validate<'a>(&'a self, value: &'a Value) -> SchemaOutcome<'a, Self::Output> {
        (**self).validate(value)
    }
}

impl<S: StandardSchema + ?Sized> StandardSchema for Arc<S> {
    type Output = S::Output;

    fn vendor(&self) -> &str {
        (**self).vendor()
    }

    fn version(&self) -> u32 {
        (**self).version()
    }

    fn validate<'a>(&'a self, value: &'a Value) -> SchemaOutcome<'a, Self::Output> {
        (**self).validate(value)
    }
}
