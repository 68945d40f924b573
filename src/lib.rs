//! # stins
//!
//! Framework-agnostic request validation and uniform error responses for HTTP
//! services, built over a pluggable schema contract.
//!
//! ## Overview
//!
//! Validation is delegated to any value implementing [`StandardSchema`]. A
//! schema either answers immediately or defers to a future; the crate detects
//! which at runtime, so the same schema works with both the awaiting entry
//! points ([`validate`], [`validate_request`]) and, when it does not defer,
//! the synchronous ones ([`validate_sync`], [`validate_request_sync`]).
//!
//! Every adapter in [`middleware::adapters`] funnels into the same response
//! builders, so clients see one body shape regardless of framework:
//!
//! ```json
//! {"message": "Validation failed", "errors": [{"message": "Invalid email", "path": "user.email"}]}
//! ```
//!
//! ## Core Types
//!
//! - [`Issue`] and [`Issues`]: what a schema reports on rejection
//! - [`IssuePath`]: location of an issue inside the input
//! - [`FormattedIssue`]: an issue with its path flattened to `a.b.0`
//! - [`MiddlewareResponse`]: a `{status, body}` pair ready to send
//! - [`Schema`]: factory for the bundled schema adapters
//!
//! ## Example
//!
//! ```rust
//! use serde_json::json;
//! use stins::{validate_request_sync, Issue, IssuePath, Schema, StandardResult, ValidationOptions};
//!
//! let schema = Schema::from_fn(|value| match value.get("email").and_then(|v| v.as_str()) {
//!     Some(email) if email.contains('@') => StandardResult::Value(email.to_string()),
//!     _ => StandardResult::issues([Issue::at(IssuePath::from_field("email"), "Invalid email")]),
//! });
//!
//! let response = validate_request_sync(&schema, &json!({"email": "nope"}), &ValidationOptions::new())
//!     .unwrap()
//!     .into_result()
//!     .unwrap_err();
//!
//! assert_eq!(response.status.as_u16(), 400);
//! assert_eq!(
//!     serde_json::to_value(&response.body).unwrap(),
//!     json!({"message": "Validation failed", "errors": [{"message": "Invalid email", "path": "email"}]})
//! );
//! ```
//!
//! ## Runtime mode
//!
//! Error responses include a stack rendering unless the process runs in
//! production, which is read once from `STINS_ENV` (then `APP_ENV`). See
//! [`RuntimeMode`].

pub mod config;
pub mod error;
pub mod format;
pub mod middleware;
pub mod openapi;
pub mod path;
pub mod schema;
pub mod status;
pub mod validation;

pub use config::RuntimeMode;
pub use error::{AsyncSchemaError, Issue, Issues};
pub use format::{format_issues, format_issues_as_object, FormattedIssue};
pub use middleware::{
    create_error_response, create_error_response_in, create_not_found_response, validate_request,
    validate_request_sync, ErrorHandlerOptions, MiddlewareResponse, MiddlewareResponseBody, Thrown,
    Validated, ValidationOptions, ValidationResponse,
};
pub use openapi::{
    json_content, json_content_one_of, json_content_required, one_of, JsonContentOptions,
    SchemaTarget, ToJsonSchema,
};
pub use path::{IssuePath, PathSegment, PropertyKey};
#[cfg(feature = "json-schema")]
pub use schema::JsonSchema;
pub use schema::{AnySchema, Schema, SchemaOutcome, StandardResult, StandardSchema, TypedSchema};
pub use status::{status_phrase, StatusCode};
pub use validation::{validate, validate_sync, ValidationResult};
