//! Retry policy for origin fetches.
//!
//! Only a short allow-list of transport conditions plus the backend's own
//! transient class is retried; everything else is terminal on the first attempt.

use std::time::Duration;

use super::{BlobStoreError, TransportFault};

pub const MAX_ATTEMPTS: u32 = 8;
const BASE_DELAY: Duration = Duration::from_millis(25);
const MAX_DELAY: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: u32,
    base_delay: Duration,
    max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: MAX_ATTEMPTS,
            base_delay: BASE_DELAY,
            max_delay: MAX_DELAY,
        }
    }
}

impl RetryPolicy {
    #[must_use]
    pub const fn with_backoff(mut self, base_delay: Duration, max_delay: Duration) -> Self {
        self.base_delay = base_delay;
        self.max_delay = max_delay;
        self
    }

    /// Total attempts allowed, including the first one.
    #[must_use]
    pub const fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    #[must_use]
    pub const fn is_retryable(&self, error: &BlobStoreError) -> bool {
        match error {
            BlobStoreError::Transport { fault, .. } => matches!(
                fault,
                TransportFault::ConnectionReset
                    | TransportFault::BrokenPipe
                    | TransportFault::TimedOut
            ),
            BlobStoreError::Transient(_) => true,
            BlobStoreError::NotFound(_) | BlobStoreError::Other(_) => false,
        }
    }

    /// Whether another attempt may follow a failed `attempt` (1-based).
    #[must_use]
    pub const fn should_retry(&self, attempt: u32, error: &BlobStoreError) -> bool {
        attempt < self.max_attempts && self.is_retryable(error)
    }

    /// Delay before the attempt following `attempt`: exponential, capped.
    #[must_use]
    pub fn backoff(&self, attempt: u32) -> Duration {
        let factor = 2u32.saturating_pow(attempt.saturating_sub(1));
        self.base_delay.saturating_mul(factor).min(self.max_delay)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transport(fault: TransportFault) -> BlobStoreError {
        BlobStoreError::Transport {
            fault,
            message: "io".to_string(),
        }
    }

    #[test]
    fn test_allow_list() {
        let policy = RetryPolicy::default();
        assert!(policy.is_retryable(&transport(TransportFault::ConnectionReset)));
        assert!(policy.is_retryable(&transport(TransportFault::BrokenPipe)));
        assert!(policy.is_retryable(&transport(TransportFault::TimedOut)));
        assert!(policy.is_retryable(&BlobStoreError::Transient("SlowDown".to_string())));

        assert!(!policy.is_retryable(&transport(TransportFault::Other)));
        assert!(!policy.is_retryable(&BlobStoreError::NotFound("k".to_string())));
        assert!(!policy.is_retryable(&BlobStoreError::Other("AccessDenied".to_string())));
    }

    #[test]
    fn test_attempt_ceiling() {
        let policy = RetryPolicy::default();
        let error = transport(TransportFault::ConnectionReset);
        assert_eq!(policy.max_attempts(), 8);
        assert!(policy.should_retry(1, &error));
        assert!(policy.should_retry(7, &error));
        assert!(!policy.should_retry(8, &error));
    }

    #[test]
    fn test_backoff_is_exponential_and_capped() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.backoff(1), Duration::from_millis(25));
        assert_eq!(policy.backoff(2), Duration::from_millis(50));
        assert_eq!(policy.backoff(3), Duration::from_millis(100));
        assert_eq!(policy.backoff(10), Duration::from_secs(1));
        assert_eq!(policy.backoff(u32::MAX), Duration::from_secs(1));

        let immediate = policy.with_backoff(Duration::ZERO, Duration::ZERO);
        assert_eq!(immediate.backoff(5), Duration::ZERO);
    }
}
