//! Response shapes and options shared by every adapter.
//!
//! The serialized form of [`MiddlewareResponse`] is the wire contract:
//! `{"status": 400, "body": {"message": ..., "errors": [...], "stack": ...}}`
//! with absent optional fields omitted rather than `null`.

use serde::{Deserialize, Serialize};

use crate::config::RuntimeMode;
use crate::format::FormattedIssue;
use crate::status::StatusCode;

/// Body of every response produced by this crate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MiddlewareResponseBody {
    /// Human-readable summary.
    pub message: String,
    /// Validation issues, present only for validation failures.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<FormattedIssue>>,
    /// Stack rendering, present only when enabled for error-kind values.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stack: Option<String>,
}

impl MiddlewareResponseBody {
    /// A body carrying only a message.
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            errors: None,
            stack: None,
        }
    }

    /// Serializes the body to JSON bytes.
    pub fn to_json_vec(&self) -> Vec<u8> {
        // A struct of strings and string vectors always serializes.
        serde_json::to_vec(self).unwrap_or_default()
    }
}

/// A framework-agnostic `{status, body}` pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MiddlewareResponse {
    /// HTTP status, serialized as an integer.
    #[serde(with = "status_code")]
    pub status: StatusCode,
    /// Response body.
    pub body: MiddlewareResponseBody,
}

impl MiddlewareResponse {
    /// Creates a response.
    pub fn new(status: StatusCode, body: MiddlewareResponseBody) -> Self {
        Self { status, body }
    }
}

/// Outcome of [`validate_request`](crate::validate_request): validated data,
/// or a ready-made failure response.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationResponse<T> {
    /// The schema accepted the input.
    Success {
        /// The schema's typed output.
        data: T,
    },
    /// The schema rejected the input.
    Failure {
        /// Status to respond with.
        status: StatusCode,
        /// Body listing the formatted issues.
        body: MiddlewareResponseBody,
    },
}

impl<T> ValidationResponse<T> {
    /// Returns true if validation succeeded.
    pub fn is_success(&self) -> bool {
        matches!(self, ValidationResponse::Success { .. })
    }

    /// Returns true if validation failed.
    pub fn is_failure(&self) -> bool {
        !self.is_success()
    }

    /// Returns the data on success, or the failure as a [`MiddlewareResponse`].
    pub fn into_result(self) -> Result<T, MiddlewareResponse> {
        match self {
            ValidationResponse::Success { data } => Ok(data),
            ValidationResponse::Failure { status, body } => Err(MiddlewareResponse { status, body }),
        }
    }
}

/// Options for validation responses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValidationOptions {
    /// Status for validation failures. Defaults to 400.
    pub status: Option<StatusCode>,
}

impl ValidationOptions {
    /// Options with every default.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the failure status and returns self for chaining.
    pub fn status(mut self, status: StatusCode) -> Self {
        self.status = Some(status);
        self
    }

    /// The failure status after defaults.
    pub fn resolved_status(&self) -> StatusCode {
        self.status.unwrap_or(StatusCode::BAD_REQUEST)
    }
}

/// Options for error responses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ErrorHandlerOptions {
    /// Whether to include stack renderings. Defaults to false in production
    /// and true otherwise.
    pub include_stack: Option<bool>,
    /// Status for error responses. Defaults to 500.
    pub default_status: Option<StatusCode>,
}

impl ErrorHandlerOptions {
    /// Options with every default.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets stack inclusion and returns self for chaining.
    pub fn include_stack(mut self, include: bool) -> Self {
        self.include_stack = Some(include);
        self
    }

    /// Sets the response status and returns self for chaining.
    pub fn default_status(mut self, status: StatusCode) -> Self {
        self.default_status = Some(status);
        self
    }

    /// Whether stacks are included under `mode`. An explicit setting wins.
    pub fn resolved_include_stack(&self, mode: RuntimeMode) -> bool {
        self.include_stack
            .unwrap_or_else(|| mode.include_stack_by_default())
    }

    /// The response status after defaults.
    pub fn resolved_status(&self) -> StatusCode {
        self.default_status
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

mod status_code {
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    use crate::status::StatusCode;

    pub fn serialize<S: Serializer>(status: &StatusCode, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u16(status.as_u16())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<StatusCode, D::Error> {
        let code = u16::deserialize(deserializer)?;
        StatusCode::from_u16(code).map_err(D::Error::custom)
    }
}
