// Integration tests for the full invocation flow
// Raw Lambda payloads go through `function_handler` with the built-in roles.
#![allow(clippy::unwrap_used)]

mod common;

use common::{MockStore, gateway_request, origin_only_router, stored};
use lambda_runtime::{Context, LambdaEvent};
use nextjs_lambda_router::function_handler;
use nextjs_lambda_router::models::{EventType, GatewayHeaders, InternalResponse};
use nextjs_lambda_router::origin::{BlobStoreError, ObjectRef};
use nextjs_lambda_router::translate::{to_gateway_response, to_internal_event};
use serde_json::{Value, json};

fn create_test_lambda_event(payload: Value) -> LambdaEvent<Value> {
    LambdaEvent::new(payload, Context::default())
}

#[tokio::test]
async fn test_full_page_request_flow() {
    let mut store = MockStore::new();
    store
        .expect_get_object()
        .withf(|object: &ObjectRef| object.key == "nextjs-demo/0.0.1")
        .times(1)
        .returning(|_| Ok(stored(b"<html>demo</html>", None)));
    let router = origin_only_router(store);

    let payload = serde_json::to_value(gateway_request("/nextjs-demo/0.0.1")).unwrap();
    let response = function_handler(&router, create_test_lambda_event(payload))
        .await
        .unwrap();

    assert_eq!(response.status_code, 200);
    assert_eq!(response.body, "<html>demo</html>");
    assert!(!response.is_base64_encoded);

    let wire = serde_json::to_value(&response).unwrap();
    assert_eq!(wire["statusCode"], 200);
    assert_eq!(wire["isBase64Encoded"], false);
    assert_eq!(wire["headers"]["Content-Type"], "text/html");
}

#[tokio::test]
async fn test_undeployed_roles_answer_501() {
    let mut store = MockStore::new();
    store.expect_get_object().never();
    let router = origin_only_router(store);

    let payload = serde_json::to_value(gateway_request("/api/hello")).unwrap();
    let response = function_handler(&router, create_test_lambda_event(payload))
        .await
        .unwrap();

    assert_eq!(response.status_code, 501);
    assert_eq!(response.body, "api handler is not deployed");
}

#[tokio::test]
async fn test_malformed_payload_is_500() {
    let mut store = MockStore::new();
    store.expect_get_object().never();
    let router = origin_only_router(store);

    let payload = json!({ "rawPath": "/about", "headers": ["not", "a", "map"] });
    let response = function_handler(&router, create_test_lambda_event(payload))
        .await
        .unwrap();

    assert_eq!(response.status_code, 500);
    assert!(response.body.starts_with("invalid gateway event"));
}

#[tokio::test]
async fn test_sparse_payload_is_served() {
    let mut store = MockStore::new();
    store
        .expect_get_object()
        .times(1)
        .returning(|object| Err(BlobStoreError::NotFound(object.key)));
    let router = origin_only_router(store);

    let response = function_handler(&router, create_test_lambda_event(json!({})))
        .await
        .unwrap();

    assert_eq!(response.status_code, 404);
}

#[tokio::test]
async fn test_concurrent_requests() {
    let mut store = MockStore::new();
    store
        .expect_get_object()
        .times(10)
        .returning(|object| Ok(stored(object.key.as_bytes(), Some("text/plain"))));
    let router = origin_only_router(store);

    let requests: Vec<_> = (0..10).map(|i| gateway_request(&format!("/page-{i}"))).collect();
    let responses = futures::future::join_all(requests.iter().map(|r| router.handle(r))).await;

    for (i, response) in responses.iter().enumerate() {
        assert_eq!(response.status_code, 200);
        assert_eq!(response.body, format!("page-{i}"));
    }
}

#[test]
fn test_header_round_trip() {
    let headers = GatewayHeaders::from([
        ("accept".to_string(), "text/html".to_string()),
        ("Content-Type".to_string(), "application/json".to_string()),
        ("X-Request-Id".to_string(), "abc".to_string()),
    ]);
    let mut request = gateway_request("/about");
    request.headers = headers.clone();

    let event = to_internal_event(&request, &common::config(), EventType::OriginRequest);
    let mut response = InternalResponse::new("200", "OK");
    response.headers = event.request.headers;

    assert_eq!(to_gateway_response(&response).unwrap().headers, headers);
}
