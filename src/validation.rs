//! Invoking a schema and normalizing its outcome.
//!
//! [`validate`] awaits the schema whether or not it suspends. [`validate_sync`]
//! refuses deferred outcomes with [`AsyncSchemaError`] instead of blocking on
//! them. Both return the raw [`ValidationResult`]; the HTTP-shaped
//! counterparts live in [`middleware`](crate::middleware).

use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{AsyncSchemaError, Issues};
use crate::schema::{SchemaOutcome, StandardResult, StandardSchema};

/// Type alias for validation results using [`Issues`].
pub type ValidationResult<T> = stillwater::Validation<T, Issues>;

/// Validates `value` against `schema`, awaiting the schema if it defers.
///
/// # Example
///
/// ```rust
/// use serde_json::json;
/// use stins::{validate, Schema, StandardResult};
///
/// let schema = Schema::from_async_fn(|value| async move { StandardResult::Value(value) });
///
/// let result = futures::executor::block_on(validate(&schema, &json!("async-value")));
/// assert!(result.is_success());
/// ```
pub async fn validate<S>(schema: &S, value: &Value) -> ValidationResult<S::Output>
where
    S: StandardSchema + ?Sized,
{
    let outcome = schema.validate(value);
    let deferred = outcome.is_deferred();
    let result = outcome.resolve().await;
    trace_outcome(schema, &result, deferred);
    result.into_validation()
}

/// Validates `value` against `schema` without suspending.
///
/// # Errors
///
/// Returns [`AsyncSchemaError::Validate`] if the schema deferred its result.
/// The pending computation is dropped unpolled.
pub fn validate_sync<S>(schema: &S, value: &Value) -> Result<ValidationResult<S::Output>, AsyncSchemaError>
where
    S: StandardSchema + ?Sized,
{
    let result = immediate(schema, value).ok_or(AsyncSchemaError::Validate)?;
    Ok(result.into_validation())
}

/// Invokes `schema` and returns its result only if it completed immediately.
pub(crate) fn immediate<S>(schema: &S, value: &Value) -> Option<StandardResult<S::Output>>
where
    S: StandardSchema + ?Sized,
{
    match schema.validate(value) {
        SchemaOutcome::Immediate(result) => {
            trace_outcome(schema, &result, false);
            Some(result)
        }
        SchemaOutcome::Deferred(_) => {
            warn!(vendor = schema.vendor(), "schema deferred on a synchronous entry point");
            None
        }
    }
}

pub(crate) fn trace_outcome<S, T>(schema: &S, result: &StandardResult<T>, deferred: bool)
where
    S: StandardSchema + ?Sized,
{
    match result {
        StandardResult::Value(_) => {
            debug!(vendor = schema.vendor(), deferred, "schema accepted input");
        }
        StandardResult::Issues(issues) => {
            debug!(
                vendor = schema.vendor(),
                deferred,
                issues = issues.len(),
                "schema rejected input"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Issue;
    use crate::schema::Schema;
    use serde_json::json;
    use stillwater::Validation;

    #[test]
    fn test_sync_success_returns_value() {
        let schema = Schema::from_fn(|value| StandardResult::Value(value.clone()));

        match validate_sync(&schema, &json!("hello")).unwrap() {
            Validation::Success(data) => assert_eq!(data, json!("hello")),
            Validation::Failure(_) => panic!("Expected success"),
        }
    }

    #[test]
    fn test_sync_failure_returns_issues() {
        let schema =
            Schema::from_fn(|_| StandardResult::<()>::issues([Issue::new("Invalid value")]));

        match validate_sync(&schema, &json!(123)).unwrap() {
            Validation::Success(_) => panic!("Expected failure"),
            Validation::Failure(issues) => {
                assert_eq!(issues.len(), 1);
                assert_eq!(issues.first().unwrap().message, "Invalid value");
            }
        }
    }

    #[test]
    fn test_empty_issues_is_still_failure() {
        let schema = Schema::from_fn(|_| StandardResult::<()>::Issues(Issues::default()));

        let result = validate_sync(&schema, &json!({})).unwrap();
        assert!(result.is_failure());
    }

    #[test]
    fn test_sync_rejects_deferred_schema() {
        let schema = Schema::from_async_fn(|value| async move { StandardResult::Value(value) });

        let err = validate_sync(&schema, &json!("test")).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Schema validation is async. Use validate() instead of validateSync()."
        );
    }

    #[tokio::test]
    async fn test_async_awaits_deferred_schema() {
        let schema = Schema::from_async_fn(|_| async {
            StandardResult::<String>::issues([Issue::new("Async error")])
        });

        match validate(&schema, &json!("bad")).await {
            Validation::Success(_) => panic!("Expected failure"),
            Validation::Failure(issues) => {
                assert_eq!(issues.first().unwrap().message, "Async error")
            }
        }
    }

    #[tokio::test]
    async fn test_async_accepts_immediate_schema() {
        let schema = Schema::from_fn(|value| StandardResult::Value(value.clone()));

        let result = validate(&schema, &json!({"a": 1})).await;
        assert!(result.is_success());
    }
}
