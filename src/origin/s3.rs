//! S3-backed `BlobStore`.

use std::error::Error as StdError;

use async_trait::async_trait;
use aws_config::retry::RetryConfig;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_s3::Client;
use aws_sdk_s3::config::http::HttpResponse;
use aws_sdk_s3::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use aws_sdk_s3::operation::get_object::GetObjectError;

use super::{BlobStore, BlobStoreError, ObjectRef, StoredObject, TransportFault};

// Error codes the SDK's default classifier treats as throttling or transient.
const TRANSIENT_ERROR_CODES: [&str; 16] = [
    "Throttling",
    "ThrottlingException",
    "ThrottledException",
    "RequestThrottledException",
    "TooManyRequestsException",
    "ProvisionedThroughputExceededException",
    "TransactionInProgressException",
    "RequestLimitExceeded",
    "BandwidthLimitExceeded",
    "LimitExceededException",
    "RequestThrottled",
    "SlowDown",
    "PriorRequestNotComplete",
    "EC2ThrottledException",
    "RequestTimeout",
    "RequestTimeoutException",
];

const TRANSIENT_STATUS_CODES: [u16; 4] = [500, 502, 503, 504];

/// Production blob store. Built once per process and shared by every request.
#[derive(Debug, Clone)]
pub struct S3BlobStore {
    client: Client,
}

impl S3BlobStore {
    #[must_use]
    pub const fn new(client: Client) -> Self {
        Self { client }
    }

    /// Client bound to `region` using ambient credentials.
    ///
    /// SDK-level retries are disabled; `RetryPolicy` owns retrying.
    pub async fn from_region(region: &str) -> Self {
        let sdk_config = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(region.to_string()))
            .retry_config(RetryConfig::disabled())
            .load()
            .await;
        Self::new(Client::new(&sdk_config))
    }
}

#[async_trait]
impl BlobStore for S3BlobStore {
    async fn get_object(&self, object: ObjectRef) -> Result<StoredObject, BlobStoreError> {
        let output = self
            .client
            .get_object()
            .bucket(&object.bucket)
            .key(&object.key)
            .send()
            .await
            .map_err(|e| classify_get_object_error(&object.key, &e))?;

        let content_type = output.content_type().map(str::to_owned);
        let cache_control = output.cache_control().map(str::to_owned);
        let body = output
            .body
            .collect()
            .await
            .map_err(|e| BlobStoreError::Transport {
                fault: io_fault(&e),
                message: e.to_string(),
            })?
            .into_bytes()
            .to_vec();

        Ok(StoredObject {
            body,
            content_type,
            cache_control,
        })
    }
}

fn classify_get_object_error(
    key: &str,
    error: &SdkError<GetObjectError, HttpResponse>,
) -> BlobStoreError {
    let message = DisplayErrorContext(error).to_string();
    match error {
        SdkError::ServiceError(service) if service.err().is_no_such_key() => {
            BlobStoreError::NotFound(key.to_string())
        }
        SdkError::ServiceError(service) => {
            let status = service.raw().status().as_u16();
            let transient_code = service
                .err()
                .code()
                .is_some_and(|code| TRANSIENT_ERROR_CODES.contains(&code));
            if status == 404 {
                BlobStoreError::NotFound(key.to_string())
            } else if transient_code || TRANSIENT_STATUS_CODES.contains(&status) {
                BlobStoreError::Transient(message)
            } else {
                BlobStoreError::Other(message)
            }
        }
        SdkError::TimeoutError(_) => BlobStoreError::Transport {
            fault: TransportFault::TimedOut,
            message,
        },
        SdkError::DispatchFailure(failure) if failure.is_timeout() => BlobStoreError::Transport {
            fault: TransportFault::TimedOut,
            message,
        },
        SdkError::DispatchFailure(_) => BlobStoreError::Transport {
            fault: io_fault(error),
            message,
        },
        SdkError::ResponseError(_) => BlobStoreError::Transient(message),
        _ => BlobStoreError::Other(message),
    }
}

// First `std::io::Error` in the source chain decides the fault.
fn io_fault(error: &(dyn StdError + 'static)) -> TransportFault {
    let mut current: Option<&(dyn StdError + 'static)> = Some(error);
    while let Some(err) = current {
        if let Some(io) = err.downcast_ref::<std::io::Error>() {
            return io.kind().into();
        }
        current = err.source();
    }
    TransportFault::Other
}
