//! A validation failure renders identically through every adapter.

use bytes::Bytes;
use serde_json::{json, Value};
use stins::middleware::adapters::chain::{ChainContext, ChainError, ValidationMiddleware};
use stins::middleware::adapters::http::into_response;
use stins::{
    validate_request, Issue, IssuePath, MiddlewareResponse, Schema, StandardResult, StandardSchema,
    StatusCode, ValidationOptions,
};

fn email_schema() -> impl StandardSchema<Output = Value> {
    Schema::from_fn(|value: &Value| match value.get("email").and_then(Value::as_str) {
        Some(email) if email.contains('@') => StandardResult::Value(value.clone()),
        _ => StandardResult::issues([Issue::at(
            IssuePath::from_field("user").push_field("email"),
            "Invalid email",
        )]),
    })
}

fn expected_body() -> Value {
    json!({
        "message": "Validation failed",
        "errors": [{"message": "Invalid email", "path": "user.email"}]
    })
}

async fn failure(options: &ValidationOptions) -> MiddlewareResponse {
    validate_request(&email_schema(), &json!({"email": "nope"}), options)
        .await
        .into_result()
        .unwrap_err()
}

#[tokio::test]
async fn test_http_adapter_sends_failure_unchanged() {
    let options = ValidationOptions::new().status(StatusCode::UNPROCESSABLE_ENTITY);
    let response = failure(&options).await;

    let res: http::Response<Bytes> = into_response(&response);
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(serde_json::from_slice::<Value>(res.body()).unwrap(), expected_body());
}

#[tokio::test]
async fn test_chain_adapter_carries_failure_unchanged() {
    let response = failure(&ValidationOptions::new()).await;
    let from_builder = ChainError::from(response.clone());

    let middleware = ValidationMiddleware::new(email_schema(), ValidationOptions::new());
    let from_middleware = middleware
        .server(ChainContext::with_data(json!({"email": "nope"})), |_| async { Ok(()) })
        .await
        .unwrap_err();

    assert_eq!(from_builder, from_middleware);
    assert_eq!(from_middleware.into_response(), response);
}

#[cfg(feature = "axum")]
#[tokio::test]
async fn test_axum_adapter_sends_failure_unchanged() {
    use axum::response::IntoResponse;

    let response = failure(&ValidationOptions::new()).await;
    let res = response.into_response();

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
    assert_eq!(serde_json::from_slice::<Value>(&bytes).unwrap(), expected_body());
}

#[cfg(feature = "tower")]
#[tokio::test]
async fn test_tower_layer_matches_builder() {
    use http_body_util::{BodyExt, Full};
    use std::convert::Infallible;
    use stins::middleware::adapters::tower::ValidateBodyLayer;
    use tower::{service_fn, Layer, ServiceExt};

    let svc = ValidateBodyLayer::new(email_schema(), ValidationOptions::new()).layer(service_fn(
        |_req: http::Request<Full<Bytes>>| async {
            Ok::<_, Infallible>(http::Response::new(Full::new(Bytes::new())))
        },
    ));

    let req = http::Request::post("/signup")
        .body(Full::new(Bytes::from_static(br#"{"email":"nope"}"#)))
        .unwrap();
    let res = svc.oneshot(req).await.unwrap();

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let bytes = res.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(serde_json::from_slice::<Value>(&bytes).unwrap(), expected_body());
}
