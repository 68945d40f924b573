//! Schema contract and the schema adapters shipped with this crate.
//!
//! Validation is delegated to a pluggable [`StandardSchema`]. This module
//! defines the contract and provides adapters for closures, serde types and
//! (with the `json-schema` feature) JSON Schema documents.
//!
//! # Example
//!
//! ```rust
//! use serde_json::json;
//! use stins::{validate_sync, Issue, Schema, StandardResult};
//!
//! let schema = Schema::from_fn(|value| match value.get("name") {
//!     Some(name) if name.is_string() => StandardResult::Value(value.clone()),
//!     _ => StandardResult::issues([Issue::new("Invalid name")]),
//! });
//!
//! let result = validate_sync(&schema, &json!({"name": "Ada"})).unwrap();
//! assert!(result.is_success());
//! ```

mod func;
#[cfg(feature = "json-schema")]
mod json_schema;
mod traits;
mod typed;

use std::future::Future;

use serde::de::DeserializeOwned;
use serde_json::Value;

pub use func::{AsyncSchemaFn, SchemaFn, DEFAULT_VENDOR};
#[cfg(feature = "json-schema")]
pub use json_schema::{JsonSchema, JsonSchemaError};
pub use traits::{AnySchema, SchemaOutcome, StandardResult, StandardSchema};
pub use typed::TypedSchema;

/// Entry point for creating schemas.
///
/// `Schema` provides factory methods for the adapters in this module. Any
/// other validator can take part by implementing [`StandardSchema`] directly.
pub struct Schema;

impl Schema {
    /// Creates a schema from a synchronous validation closure.
    pub fn from_fn<F, T>(validator: F) -> SchemaFn<F, T>
    where
        F: Fn(&Value) -> StandardResult<T> + Send + Sync,
    {
        SchemaFn::new(validator)
    }

    /// Creates a schema from a closure returning a future.
    ///
    /// The resulting schema always defers, so it can only be used with the
    /// awaiting entry points.
    ///
    /// # Example
    ///
    /// ```rust
    /// use serde_json::json;
    /// use stins::{validate_sync, AsyncSchemaError, Schema, StandardResult};
    ///
    /// let schema = Schema::from_async_fn(|value| async move { StandardResult::Value(value) });
    ///
    /// assert_eq!(
    ///     validate_sync(&schema, &json!(1)).unwrap_err(),
    ///     AsyncSchemaError::Validate
    /// );
    /// ```
    pub fn from_async_fn<F, Fut, T>(validator: F) -> AsyncSchemaFn<F, T>
    where
        F: Fn(Value) -> Fut + Send + Sync,
        Fut: Future<Output = StandardResult<T>> + Send + 'static,
    {
        AsyncSchemaFn::new(validator)
    }

    /// Creates a schema that deserializes input into `T`.
    pub fn typed<T: DeserializeOwned>() -> TypedSchema<T> {
        TypedSchema::new()
    }

    /// Compiles a JSON Schema document.
    ///
    /// # Errors
    ///
    /// Returns `JsonSchemaError::InvalidSchema` if the document does not compile.
    #[cfg(feature = "json-schema")]
    pub fn json(document: Value) -> Result<JsonSchema, JsonSchemaError> {
        JsonSchema::new(document)
    }
}
