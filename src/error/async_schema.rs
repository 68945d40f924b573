//! Error raised when a synchronous entry point meets an asynchronous schema.

use thiserror::Error;

/// A schema's validation deferred its result, but a synchronous entry point
/// was used.
///
/// This is a usage error rather than a data problem: the caller should switch
/// to the awaiting counterpart named in the message. The deferred computation
/// is dropped without being polled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AsyncSchemaError {
    /// Raised by [`validate_sync`](crate::validate_sync).
    #[error("Schema validation is async. Use validate() instead of validateSync().")]
    Validate,
    /// Raised by [`validate_request_sync`](crate::validate_request_sync).
    #[error(
        "Schema validation is async. Use validateRequest() instead of validateRequestSync()."
    )]
    ValidateRequest,
}
