//! Framework-agnostic response builders.
//!
//! Every adapter funnels into these functions, so status and body are computed
//! in one place and adapters only translate them.

mod error_handler;
mod not_found;
mod validation;

pub use error_handler::{
    create_error_response, create_error_response_in, Thrown, INTERNAL_SERVER_ERROR_MESSAGE,
};
pub use not_found::create_not_found_response;
pub use validation::{validate_request, validate_request_sync, VALIDATION_FAILED_MESSAGE};
