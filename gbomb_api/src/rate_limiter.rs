//! Single-token rate limiter shared by every request an [`Invoker`](crate::Invoker) makes.
//!
//! The bucket holds at most one token and refills it a fixed interval after
//! it was last handed out. Idle time never accumulates extra tokens, so at
//! most one request proceeds per interval no matter how many callers wait.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::{sleep, Instant};
use tokio_util::sync::CancellationToken;

use crate::Error;

/// Refill interval used against the production API. The upstream quota is
/// undocumented; this stays well under it.
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(31);

/// Capacity-one token bucket.
pub struct RateLimiter {
    /// Instant at which the single token becomes available again.
    next_token: Mutex<Instant>,
    interval: Duration,
    granted: AtomicU64,
}

impl RateLimiter {
    /// Create a limiter whose token is available immediately and then every `interval`.
    pub fn new(interval: Duration) -> Self {
        Self {
            next_token: Mutex::new(Instant::now()),
            interval,
            granted: AtomicU64::new(0),
        }
    }

    /// Wait until the token is available, then take it.
    pub async fn acquire(&self) {
        // A token that is never cancelled makes the wait infallible.
        let never = CancellationToken::new();
        let _ = self.acquire_or_cancel(&never).await;
    }

    /// Wait until the token is available, then take it, unless `cancel` fires first.
    ///
    /// A cancelled wait returns [`Error::Cancelled`] and leaves the bucket as it
    /// was: the caller is not charged a token.
    pub async fn acquire_or_cancel(&self, cancel: &CancellationToken) -> Result<(), Error> {
        loop {
            if cancel.is_cancelled() {
                return Err(Error::Cancelled);
            }

            let now = Instant::now();
            let mut next = self.next_token.lock().await;
            if now >= *next {
                *next = now + self.interval;
                self.granted.fetch_add(1, Ordering::Relaxed);
                return Ok(());
            }

            let wait = next.duration_since(now);
            // Drop lock before sleeping
            drop(next);
            tracing::debug!("Rate limiter: waiting {:.1}s for a token", wait.as_secs_f64());

            tokio::select! {
                biased;
                _ = cancel.cancelled() => return Err(Error::Cancelled),
                _ = sleep(wait) => {}
            }
        }
    }

    /// Non-blocking snapshot of how many tokens are available right now (0 or 1).
    ///
    /// Returns `None` if the lock is contended (callers should treat as "unknown").
    pub fn available(&self) -> Option<u64> {
        match self.next_token.try_lock() {
            Ok(next) => Some(u64::from(Instant::now() >= *next)),
            Err(_) => None,
        }
    }

    /// Number of tokens handed out since construction.
    pub fn granted(&self) -> u64 {
        self.granted.load(Ordering::Relaxed)
    }

    /// The configured refill interval.
    pub fn interval(&self) -> Duration {
        self.interval
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new(DEFAULT_INTERVAL)
    }
}
