use std::sync::Arc;

use lambda_runtime::{Error, service_fn};
use nextjs_lambda_router::origin::{BlobFetcher, RetryPolicy, S3BlobStore};
use nextjs_lambda_router::roles::Roles;
use nextjs_lambda_router::{Config, Router, function_handler};

#[tokio::main]
async fn main() -> Result<(), Error> {
    // Use Lambda runtime's built-in tracing subscriber for CloudWatch Logs
    lambda_runtime::tracing::init_default_subscriber();

    let config = Config::from_env()?;
    let store = S3BlobStore::from_region(&config.region).await;
    let fetcher = BlobFetcher::new(Arc::new(store), RetryPolicy::default());
    let router = Router::new(config, Roles::origin_only(), fetcher);
    let router = &router;

    lambda_runtime::run(service_fn(move |event| async move {
        function_handler(router, event).await
    }))
    .await
}
