//! Serde-backed schema.
//!
//! [`TypedSchema`] accepts any input that deserializes into `T`. It is the
//! natural schema for handlers that already describe their payload with a
//! `#[derive(Deserialize)]` struct.

use std::fmt;
use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde_json::Value;

use super::traits::{SchemaOutcome, StandardSchema};
use crate::error::Issue;

/// A schema that validates by deserializing into `T`.
///
/// Deserialization errors become a single path-less issue carrying serde's
/// message.
///
/// # Example
///
/// ```rust
/// use serde::Deserialize;
/// use serde_json::json;
/// use stins::{validate_sync, Schema};
///
/// #[derive(Deserialize)]
/// struct CreateUser {
///     name: String,
/// }
///
/// let schema = Schema::typed::<CreateUser>();
/// assert!(validate_sync(&schema, &json!({"name": "Ada"})).unwrap().is_success());
/// assert!(validate_sync(&schema, &json!({"name": 1})).unwrap().is_failure());
/// ```
pub struct TypedSchema<T> {
    _output: PhantomData<fn() -> T>,
}

impl<T> TypedSchema<T> {
    /// Creates a schema for `T`.
    pub fn new() -> Self {
        Self {
            _output: PhantomData,
        }
    }
}

impl<T> Default for TypedSchema<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for TypedSchema<T> {
    fn clone(&self) -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for TypedSchema<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypedSchema<{}>", std::any::type_name::<T>())
    }
}

impl<T: DeserializeOwned> StandardSchema for TypedSchema<T> {
    type Output = T;

    fn vendor(&self) -> &str {
        "serde"
    }

    fn validate<'a>(&'a self, value: &'a Value) -> SchemaOutcome<'a, T> {
        match T::deserialize(value) {
            Ok(output) => SchemaOutcome::value(output),
            Err(err) => SchemaOutcome::issues([Issue::new(err.to_string())]),
        }
    }
}
