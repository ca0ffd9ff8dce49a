//! Fetches the origin object for a request and shapes it as an origin response.

use std::sync::Arc;

use base64::{Engine, engine::general_purpose::STANDARD};
use lambda_runtime::tracing::{debug, info, warn};

use super::{BlobStore, BlobStoreError, ObjectRef, RetryPolicy, StoredObject};
use crate::models::{BodyEncoding, InternalResponse, Request, RouterError, RouterResult};
use crate::utils::{is_binary_mime_type, object_key};

const DEFAULT_CONTENT_TYPE: &str = "text/html";
const DEFAULT_CACHE_CONTROL: &str = "public, max-age=0, s-maxage=2678400, must-revalidate";

/// Bounded-retry object fetcher. Holds the process-wide store handle.
#[derive(Clone)]
pub struct BlobFetcher {
    store: Arc<dyn BlobStore>,
    policy: RetryPolicy,
}

impl BlobFetcher {
    #[must_use]
    pub fn new(store: Arc<dyn BlobStore>, policy: RetryPolicy) -> Self {
        Self { store, policy }
    }

    /// Fetches the object addressed by `request`'s S3 origin and URI.
    ///
    /// A missing object, or one that is still failing once the retry policy
    /// gives up, yields a `404 Not Found` response rather than an error.
    ///
    /// # Errors
    ///
    /// Returns `RouterError::MissingOrigin` if the request has no origin descriptor.
    pub async fn fetch(&self, request: &Request) -> RouterResult<InternalResponse> {
        let s3 = request
            .origin
            .as_ref()
            .map(crate::models::Origin::s3)
            .ok_or_else(|| RouterError::MissingOrigin(request.uri.clone()))?;

        let object = ObjectRef {
            bucket: bucket_from_domain(&s3.domain_name, &s3.region).to_string(),
            key: object_key(&s3.path, &request.uri),
        };
        info!(bucket = %object.bucket, key = %object.key, "Fetching from blob store");

        match self.get_with_retries(object).await {
            Ok(stored) => Ok(found(stored)),
            Err(e) => Ok(not_found(&e)),
        }
    }

    async fn get_with_retries(&self, object: ObjectRef) -> Result<StoredObject, BlobStoreError> {
        let mut attempt = 1;
        loop {
            match self.store.get_object(object.clone()).await {
                Ok(stored) => return Ok(stored),
                Err(e) if self.policy.should_retry(attempt, &e) => {
                    let delay = self.policy.backoff(attempt);
                    warn!(
                        error = %e,
                        attempt,
                        delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                        "Transient blob store failure, retrying"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(e) => {
                    if self.policy.is_retryable(&e) {
                        warn!(error = %e, attempts = attempt, "Blob store retries exhausted");
                    }
                    return Err(e);
                }
            }
        }
    }
}

/// Recovers the bucket name from a virtual-hosted S3 domain.
///
/// Format: `assets.s3.eu-west-1.amazonaws.com` → `assets`
#[must_use]
pub fn bucket_from_domain<'a>(domain: &'a str, region: &str) -> &'a str {
    domain
        .strip_suffix(&format!(".s3.{region}.amazonaws.com"))
        .or_else(|| domain.strip_suffix(".s3.amazonaws.com"))
        .unwrap_or(domain)
}

fn found(stored: StoredObject) -> InternalResponse {
    let content_type = stored
        .content_type
        .unwrap_or_else(|| DEFAULT_CONTENT_TYPE.to_string());
    let cache_control = stored
        .cache_control
        .unwrap_or_else(|| DEFAULT_CACHE_CONTROL.to_string());

    let (body, encoding) = if is_binary_mime_type(&content_type) {
        (STANDARD.encode(&stored.body), BodyEncoding::Base64)
    } else {
        (
            String::from_utf8_lossy(&stored.body).into_owned(),
            BodyEncoding::Text,
        )
    };

    InternalResponse::new("200", "OK")
        .with_header("content-type", "Content-Type", content_type)
        .with_header("cache-control", "Cache-Control", cache_control)
        .with_body(body, encoding)
}

fn not_found(error: &BlobStoreError) -> InternalResponse {
    debug!(error = %error, "Blob store object unavailable, answering 404");
    InternalResponse::new("404", "Not Found")
}
