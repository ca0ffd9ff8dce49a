//! Blob-store origin: the capability trait, its S3 implementation, the retry
//! policy and the fetcher that maps objects into origin responses.

pub mod fetch;
pub mod retry;
pub mod s3;

use async_trait::async_trait;
use thiserror::Error;

pub use fetch::BlobFetcher;
pub use retry::RetryPolicy;
pub use s3::S3BlobStore;

/// Location of an object in the blob store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectRef {
    pub bucket: String,
    pub key: String,
}

/// A fully read object and the metadata the router uses.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoredObject {
    pub body: Vec<u8>,
    pub content_type: Option<String>,
    pub cache_control: Option<String>,
}

/// Transport-level condition behind a failed call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportFault {
    ConnectionReset,
    BrokenPipe,
    TimedOut,
    Other,
}

impl From<std::io::ErrorKind> for TransportFault {
    fn from(kind: std::io::ErrorKind) -> Self {
        match kind {
            std::io::ErrorKind::ConnectionReset => Self::ConnectionReset,
            std::io::ErrorKind::BrokenPipe => Self::BrokenPipe,
            std::io::ErrorKind::TimedOut => Self::TimedOut,
            _ => Self::Other,
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BlobStoreError {
    #[error("object not found: {0}")]
    NotFound(String),

    #[error("transport failure ({fault:?}): {message}")]
    Transport {
        fault: TransportFault,
        message: String,
    },

    /// Failures the backend itself considers transient (throttling, 5xx).
    #[error("transient backend failure: {0}")]
    Transient(String),

    #[error("blob store failure: {0}")]
    Other(String),
}

/// Get-object capability of the blob store.
///
/// Abstracted so the router can be exercised without network access.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Reads the whole object at `object`.
    ///
    /// # Errors
    ///
    /// Returns `BlobStoreError::NotFound` for missing objects; other variants
    /// describe why the call failed so the retry policy can classify it.
    async fn get_object(&self, object: ObjectRef) -> Result<StoredObject, BlobStoreError>;
}
