//! HTTP-shaped validation and error handling.
//!
//! [`core`] computes framework-agnostic `{status, body}` responses and
//! [`adapters`] translate them into each framework's native types.

pub mod adapters;
pub mod core;
pub mod types;

pub use self::core::{
    create_error_response, create_error_response_in, create_not_found_response, validate_request,
    validate_request_sync, Thrown, INTERNAL_SERVER_ERROR_MESSAGE, VALIDATION_FAILED_MESSAGE,
};
pub use adapters::Validated;
pub use types::{
    ErrorHandlerOptions, MiddlewareResponse, MiddlewareResponseBody, ValidationOptions,
    ValidationResponse,
};
