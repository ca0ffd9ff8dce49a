// Shared fixtures for the integration tests
#![allow(dead_code, clippy::unwrap_used)]

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use mockall::mock;
use nextjs_lambda_router::models::{GatewayRequest, InternalEvent};
use nextjs_lambda_router::origin::{
    BlobFetcher, BlobStore, BlobStoreError, ObjectRef, RetryPolicy, StoredObject,
};
use nextjs_lambda_router::roles::{HandlerOutcome, RoleHandler, Roles};
use nextjs_lambda_router::{Config, Router};
use serde_json::json;

mock! {
    pub Role {}

    #[async_trait]
    impl RoleHandler for Role {
        async fn handle(&self, event: InternalEvent) -> anyhow::Result<HandlerOutcome>;
    }
}

mock! {
    pub Store {}

    #[async_trait]
    impl BlobStore for Store {
        async fn get_object(&self, object: ObjectRef) -> Result<StoredObject, BlobStoreError>;
    }
}

pub const BUCKET: &str = "assets";
pub const REGION: &str = "eu-west-1";

pub fn config() -> Config {
    Config::new(REGION, BUCKET)
}

/// Fetcher whose retries do not sleep.
pub fn fetcher(store: MockStore) -> BlobFetcher {
    BlobFetcher::new(
        Arc::new(store),
        RetryPolicy::default().with_backoff(Duration::ZERO, Duration::ZERO),
    )
}

pub fn router(api: MockRole, image: MockRole, default: MockRole, store: MockStore) -> Router {
    Router::new(
        config(),
        Roles::new(Arc::new(api), Arc::new(image), Arc::new(default)),
        fetcher(store),
    )
}

/// Router whose roles and store all fail the test if called.
pub fn untouched() -> (MockRole, MockRole, MockRole, MockStore) {
    let mut api = MockRole::new();
    api.expect_handle().never();
    let mut image = MockRole::new();
    image.expect_handle().never();
    let mut default = MockRole::new();
    default.expect_handle().never();
    let mut store = MockStore::new();
    store.expect_get_object().never();
    (api, image, default, store)
}

pub fn origin_only_router(store: MockStore) -> Router {
    Router::new(config(), Roles::origin_only(), fetcher(store))
}

pub fn gateway_request(path: &str) -> GatewayRequest {
    serde_json::from_value(json!({
        "version": "2.0",
        "routeKey": "ANY /{proxy+}",
        "rawPath": path,
        "rawQueryString": "",
        "headers": {
            "accept": "text/html,application/xhtml+xml",
            "host": "apps.example.com",
            "x-forwarded-proto": "https"
        },
        "requestContext": {
            "http": {
                "method": "GET",
                "path": path,
                "protocol": "HTTP/1.1",
                "sourceIp": "68.192.58.143"
            },
            "stage": "$default"
        },
        "isBase64Encoded": false
    }))
    .unwrap()
}

pub fn stored(body: &[u8], content_type: Option<&str>) -> StoredObject {
    StoredObject {
        body: body.to_vec(),
        content_type: content_type.map(str::to_string),
        cache_control: None,
    }
}
