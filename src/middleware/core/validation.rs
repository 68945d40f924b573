use serde_json::Value;

use crate::error::{AsyncSchemaError, Issues};
use crate::format::format_issues;
use crate::middleware::types::{MiddlewareResponseBody, ValidationOptions, ValidationResponse};
use crate::schema::{StandardResult, StandardSchema};
use crate::validation::{immediate, trace_outcome};

/// Message of every validation failure body.
pub const VALIDATION_FAILED_MESSAGE: &str = "Validation failed";

/// Validates request data, awaiting the schema if it defers.
///
/// On failure the response is ready to send: status `options.status` (400 by
/// default) and a body listing the formatted issues.
///
/// # Example
///
/// ```rust
/// use serde_json::json;
/// use stins::{validate_request, Issue, IssuePath, Schema, StandardResult, ValidationOptions, ValidationResponse};
///
/// let schema = Schema::from_fn(|value| match value.get("name") {
///     Some(name) if name.is_string() => StandardResult::Value(value.clone()),
///     _ => StandardResult::issues([Issue::at(IssuePath::from_field("name"), "Invalid name")]),
/// });
///
/// let result = futures::executor::block_on(validate_request(
///     &schema,
///     &json!({"name": 123}),
///     &ValidationOptions::new(),
/// ));
///
/// match result {
///     ValidationResponse::Failure { status, body } => {
///         assert_eq!(status.as_u16(), 400);
///         assert_eq!(body.message, "Validation failed");
///     }
///     ValidationResponse::Success { .. } => unreachable!(),
/// }
/// ```
pub async fn validate_request<S>(
    schema: &S,
    data: &Value,
    options: &ValidationOptions,
) -> ValidationResponse<S::Output>
where
    S: StandardSchema + ?Sized,
{
    let outcome = schema.validate(data);
    let deferred = outcome.is_deferred();
    let result = outcome.resolve().await;
    trace_outcome(schema, &result, deferred);
    into_response(result, options)
}

/// Validates request data without suspending.
///
/// # Errors
///
/// Returns [`AsyncSchemaError::ValidateRequest`] if the schema deferred its
/// result. No partial validation takes place.
pub fn validate_request_sync<S>(
    schema: &S,
    data: &Value,
    options: &ValidationOptions,
) -> Result<ValidationResponse<S::Output>, AsyncSchemaError>
where
    S: StandardSchema + ?Sized,
{
    let result = immediate(schema, data).ok_or(AsyncSchemaError::ValidateRequest)?;
    Ok(into_response(result, options))
}

fn into_response<T>(result: StandardResult<T>, options: &ValidationOptions) -> ValidationResponse<T> {
    match result {
        StandardResult::Value(data) => ValidationResponse::Success { data },
        StandardResult::Issues(issues) => ValidationResponse::Failure {
            status: options.resolved_status(),
            body: failure_body(&issues),
        },
    }
}

fn failure_body(issues: &Issues) -> MiddlewareResponseBody {
    MiddlewareResponseBody {
        message: VALIDATION_FAILED_MESSAGE.to_string(),
        errors: Some(format_issues(issues)),
        stack: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Issue;
    use crate::format::FormattedIssue;
    use crate::path::IssuePath;
    use crate::schema::Schema;
    use crate::status::StatusCode;
    use serde_json::json;

    fn name_schema() -> impl StandardSchema<Output = Value> {
        Schema::from_fn(|value| match value.get("name") {
            Some(name) if name.is_string() => StandardResult::Value(value.clone()),
            _ => StandardResult::issues([Issue::at(IssuePath::from_field("name"), "Invalid name")]),
        })
    }

    #[test]
    fn test_sync_success() {
        let result =
            validate_request_sync(&name_schema(), &json!({"name": "Jane"}), &ValidationOptions::new())
                .unwrap();

        assert_eq!(result, ValidationResponse::Success { data: json!({"name": "Jane"}) });
    }

    #[test]
    fn test_sync_failure_body() {
        let result =
            validate_request_sync(&name_schema(), &json!({}), &ValidationOptions::new()).unwrap();

        assert_eq!(
            result,
            ValidationResponse::Failure {
                status: StatusCode::BAD_REQUEST,
                body: MiddlewareResponseBody {
                    message: "Validation failed".into(),
                    errors: Some(vec![FormattedIssue {
                        message: "Invalid name".into(),
                        path: Some("name".into()),
                    }]),
                    stack: None,
                },
            }
        );
    }

    #[test]
    fn test_sync_custom_status() {
        let options = ValidationOptions::new().status(StatusCode::UNPROCESSABLE_ENTITY);
        let result = validate_request_sync(&name_schema(), &json!({}), &options).unwrap();

        match result {
            ValidationResponse::Failure { status, .. } => {
                assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY)
            }
            ValidationResponse::Success { .. } => panic!("Expected failure"),
        }
    }

    #[test]
    fn test_empty_issues_produce_failure_with_no_detail() {
        let schema = Schema::from_fn(|_| StandardResult::<()>::Issues(Issues::default()));
        let result = validate_request_sync(&schema, &json!(1), &ValidationOptions::new()).unwrap();

        match result {
            ValidationResponse::Failure { body, .. } => assert_eq!(body.errors, Some(vec![])),
            ValidationResponse::Success { .. } => panic!("Expected failure"),
        }
    }

    #[test]
    fn test_sync_rejects_deferred_schema() {
        let schema = Schema::from_async_fn(|value| async move { StandardResult::Value(value) });

        let err = validate_request_sync(&schema, &json!({}), &ValidationOptions::new()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Schema validation is async. Use validateRequest() instead of validateRequestSync()."
        );
    }

    #[tokio::test]
    async fn test_async_resolves_deferred_schema() {
        let schema = Schema::from_async_fn(|value: Value| async move {
            let valid = value
                .get("email")
                .and_then(Value::as_str)
                .is_some_and(|email| email.contains('@'));
            if valid {
                StandardResult::Value(value)
            } else {
                StandardResult::issues([Issue::at(IssuePath::from_field("email"), "Invalid email")])
            }
        });

        let ok = validate_request(&schema, &json!({"email": "test@example.com"}), &ValidationOptions::new()).await;
        assert!(ok.is_success());

        let failed = validate_request(&schema, &json!({"email": "invalid"}), &ValidationOptions::new()).await;
        match failed {
            ValidationResponse::Failure { body, .. } => {
                let errors = body.errors.unwrap();
                assert_eq!(errors[0].message, "Invalid email");
            }
            ValidationResponse::Success { .. } => panic!("Expected failure"),
        }
    }
}
