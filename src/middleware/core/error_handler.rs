use std::any::Any;
use std::backtrace::BacktraceStatus;
use std::error::Error as StdError;
use std::fmt::{self, Write as _};

use tracing::{debug, error};

use crate::config::RuntimeMode;
use crate::middleware::types::{ErrorHandlerOptions, MiddlewareResponse, MiddlewareResponseBody};

/// Message used for values that are not errors.
pub const INTERNAL_SERVER_ERROR_MESSAGE: &str = "Internal Server Error";

/// Anything that reached an error handler.
///
/// Only the error-kind variants ([`Thrown::Error`] and [`Thrown::Report`])
/// expose their message and stack. Panic payloads and missing values are
/// reported generically so arbitrary payloads never leak into responses.
#[derive(Clone, Copy)]
pub enum Thrown<'a> {
    /// A standard error.
    Error(&'a (dyn StdError + 'static)),
    /// An application error carrying context and possibly a backtrace.
    Report(&'a anyhow::Error),
    /// A panic payload.
    Panic(&'a (dyn Any + Send)),
    /// Nothing was thrown at all.
    Nothing,
}

impl Thrown<'_> {
    /// Returns true for error-kind values.
    pub fn is_error(&self) -> bool {
        matches!(self, Thrown::Error(_) | Thrown::Report(_))
    }

    fn message(&self) -> String {
        match self {
            Thrown::Error(err) => err.to_string(),
            Thrown::Report(report) => report.to_string(),
            Thrown::Panic(_) | Thrown::Nothing => INTERNAL_SERVER_ERROR_MESSAGE.to_string(),
        }
    }

    fn stack(&self) -> Option<String> {
        match self {
            Thrown::Error(err) => Some(render_chain(*err)),
            Thrown::Report(report) => {
                let err: &(dyn StdError + 'static) = report.as_ref();
                let mut stack = render_chain(err);
                let backtrace = report.backtrace();
                if backtrace.status() == BacktraceStatus::Captured {
                    let _ = write!(stack, "\n{}", backtrace);
                }
                Some(stack)
            }
            Thrown::Panic(_) | Thrown::Nothing => None,
        }
    }
}

impl fmt::Debug for Thrown<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Thrown::Error(err) => f.debug_tuple("Error").field(err).finish(),
            Thrown::Report(report) => f.debug_tuple("Report").field(report).finish(),
            Thrown::Panic(payload) => f
                .debug_tuple("Panic")
                .field(&panic_message(*payload).unwrap_or("<non-string payload>"))
                .finish(),
            Thrown::Nothing => f.write_str("Nothing"),
        }
    }
}

impl<'a> From<&'a anyhow::Error> for Thrown<'a> {
    fn from(report: &'a anyhow::Error) -> Self {
        Thrown::Report(report)
    }
}

impl<'a> From<&'a (dyn StdError + 'static)> for Thrown<'a> {
    fn from(err: &'a (dyn StdError + 'static)) -> Self {
        Thrown::Error(err)
    }
}

impl<'a> From<&'a (dyn StdError + Send + Sync + 'static)> for Thrown<'a> {
    fn from(err: &'a (dyn StdError + Send + Sync + 'static)) -> Self {
        Thrown::Error(err)
    }
}

/// `Error: <message>` followed by one line per `source()` in the chain.
fn render_chain(err: &(dyn StdError + 'static)) -> String {
    let mut stack = format!("Error: {}", err);
    let mut source = err.source();
    while let Some(cause) = source {
        let _ = write!(stack, "\n    caused by: {}", cause);
        source = cause.source();
    }
    stack
}

fn panic_message(payload: &(dyn Any + Send)) -> Option<&str> {
    payload
        .downcast_ref::<&'static str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
}

/// Creates an error response using the process [`RuntimeMode`].
///
/// See [`create_error_response_in`].
///
/// # Example
///
/// ```rust
/// use stins::{create_error_response, ErrorHandlerOptions, StatusCode, Thrown};
///
/// let err = std::io::Error::other("Something went wrong");
/// let response = create_error_response(Thrown::Error(&err), &ErrorHandlerOptions::new());
///
/// assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
/// assert_eq!(response.body.message, "Something went wrong");
/// ```
pub fn create_error_response<'a>(
    thrown: impl Into<Thrown<'a>>,
    options: &ErrorHandlerOptions,
) -> MiddlewareResponse {
    create_error_response_in(thrown, options, RuntimeMode::current())
}

/// Creates an error response under an explicit runtime mode.
///
/// - `message` is the error's message for error-kind values and
///   `"Internal Server Error"` otherwise.
/// - `stack` is present only when stack inclusion resolves true and the value
///   is error-kind.
/// - `status` is `options.default_status`, or 500.
pub fn create_error_response_in<'a>(
    thrown: impl Into<Thrown<'a>>,
    options: &ErrorHandlerOptions,
    mode: RuntimeMode,
) -> MiddlewareResponse {
    let thrown = thrown.into();
    let status = options.resolved_status();

    match thrown {
        Thrown::Panic(payload) => {
            error!(
                status = status.as_u16(),
                panic = panic_message(payload).unwrap_or("<non-string payload>"),
                "handler panicked"
            );
        }
        _ => debug!(status = status.as_u16(), error = ?thrown, "building error response"),
    }

    let stack = if options.resolved_include_stack(mode) {
        thrown.stack()
    } else {
        None
    };

    MiddlewareResponse::new(
        status,
        MiddlewareResponseBody {
            message: thrown.message(),
            errors: None,
            stack,
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::status::StatusCode;
    use thiserror::Error;

    #[derive(Debug, Error)]
    #[error("Test")]
    struct TestError;

    #[derive(Debug, Error)]
    #[error("outer")]
    struct Outer(#[source] TestError);

    fn defaults() -> ErrorHandlerOptions {
        ErrorHandlerOptions::new()
    }

    #[test]
    fn test_defaults_to_500_with_error_message() {
        let response =
            create_error_response_in(Thrown::Error(&TestError), &defaults(), RuntimeMode::Development);

        assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(response.body.message, "Test");
    }

    #[test]
    fn test_non_errors_get_generic_message() {
        let payload: Box<dyn Any + Send> = Box::new("string error");
        for thrown in [Thrown::Panic(payload.as_ref()), Thrown::Nothing] {
            let response = create_error_response_in(thrown, &defaults(), RuntimeMode::Development);
            assert_eq!(response.body.message, "Internal Server Error");
            assert_eq!(response.body.stack, None);
        }
    }

    #[test]
    fn test_custom_status() {
        let options = ErrorHandlerOptions::new().default_status(StatusCode::SERVICE_UNAVAILABLE);
        let response = create_error_response_in(Thrown::Error(&TestError), &options, RuntimeMode::Production);
        assert_eq!(response.status, StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn test_stack_excluded_in_production_by_default() {
        let response =
            create_error_response_in(Thrown::Error(&TestError), &defaults(), RuntimeMode::Production);
        assert_eq!(response.body.stack, None);
    }

    #[test]
    fn test_stack_included_when_enabled() {
        let options = ErrorHandlerOptions::new().include_stack(true);
        let response = create_error_response_in(Thrown::Error(&TestError), &options, RuntimeMode::Production);

        let stack = response.body.stack.expect("stack");
        assert!(stack.contains("Error: Test"));
    }

    #[test]
    fn test_stack_excluded_when_disabled() {
        let options = ErrorHandlerOptions::new().include_stack(false);
        let response = create_error_response_in(Thrown::Error(&TestError), &options, RuntimeMode::Development);
        assert_eq!(response.body.stack, None);
    }

    #[test]
    fn test_stack_lists_source_chain() {
        let err = Outer(TestError);
        let response =
            create_error_response_in(Thrown::Error(&err), &defaults(), RuntimeMode::Development);

        assert_eq!(response.body.message, "outer");
        assert_eq!(
            response.body.stack.as_deref(),
            Some("Error: outer\n    caused by: Test")
        );
    }

    #[test]
    fn test_anyhow_report_uses_outer_context() {
        let report = anyhow::Error::new(TestError).context("loading user");
        let response = create_error_response_in(&report, &defaults(), RuntimeMode::Development);

        assert_eq!(response.body.message, "loading user");
        let stack = response.body.stack.expect("stack");
        assert!(stack.starts_with("Error: loading user\n    caused by: Test"));
    }

    #[test]
    fn test_stack_key_absent_from_json() {
        let response =
            create_error_response_in(Thrown::Error(&TestError), &defaults(), RuntimeMode::Production);
        let json = serde_json::to_value(&response.body).unwrap();
        assert!(json.get("stack").is_none());
        assert!(json.get("errors").is_none());
    }
}
