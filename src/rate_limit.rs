use std::collections::HashMap;
use std::time::{Duration, Instant};

use tokio::sync::Mutex;

/// Fixed-window request counter keyed by client address. The only shared
/// mutable state in the process.
pub struct RateLimiter {
    window: Duration,
    max_requests: u32,
    buckets: Mutex<HashMap<String, Bucket>>,
}

struct Bucket {
    window_start: Instant,
    count: u32,
}

impl RateLimiter {
    pub fn new(window: Duration, max_requests: u32) -> Self {
        Self {
            window,
            max_requests,
            buckets: Mutex::new(HashMap::new()),
        }
    }

    /// Count one request for `key`; false means the caller should reject it.
    pub async fn try_acquire(&self, key: &str) -> bool {
        self.try_acquire_at(key, Instant::now()).await
    }

    async fn try_acquire_at(&self, key: &str, now: Instant) -> bool {
        let mut buckets = self.buckets.lock().await;

        // Drop every expired window so the map holds at most one entry per
        // client seen in the current window.
        let window = self.window;
        buckets.retain(|_, bucket| now.duration_since(bucket.window_start) < window);

        let bucket = buckets.entry(key.to_string()).or_insert(Bucket {
            window_start: now,
            count: 0,
        });

        if bucket.count >= self.max_requests {
            return false;
        }
        bucket.count += 1;
        true
    }

    #[cfg(test)]
    async fn bucket_count(&self) -> usize {
        self.buckets.lock().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn rejects_requests_over_the_cap() {
        let limiter = RateLimiter::new(Duration::from_secs(60), 2);
        let now = Instant::now();
        assert!(limiter.try_acquire_at("1.2.3.4", now).await);
        assert!(limiter.try_acquire_at("1.2.3.4", now).await);
        assert!(!limiter.try_acquire_at("1.2.3.4", now).await);
    }

    #[tokio::test]
    async fn counter_resets_after_the_window() {
        let limiter = RateLimiter::new(Duration::from_secs(60), 1);
        let now = Instant::now();
        assert!(limiter.try_acquire_at("1.2.3.4", now).await);
        assert!(!limiter.try_acquire_at("1.2.3.4", now).await);
        let later = now + Duration::from_secs(61);
        assert!(limiter.try_acquire_at("1.2.3.4", later).await);
    }

    #[tokio::test]
    async fn expired_buckets_are_evicted() {
        let limiter = RateLimiter::new(Duration::from_secs(60), 5);
        let now = Instant::now();
        assert!(limiter.try_acquire_at("1.2.3.4", now).await);
        assert!(limiter.try_acquire_at("5.6.7.8", now).await);
        assert_eq!(limiter.bucket_count().await, 2);

        let later = now + Duration::from_secs(61);
        assert!(limiter.try_acquire_at("9.9.9.9", later).await);
        assert_eq!(limiter.bucket_count().await, 1);
    }

    #[tokio::test]
    async fn clients_are_counted_separately() {
        let limiter = RateLimiter::new(Duration::from_secs(60), 1);
        let now = Instant::now();
        assert!(limiter.try_acquire_at("1.2.3.4", now).await);
        assert!(limiter.try_acquire_at("5.6.7.8", now).await);
        assert!(!limiter.try_acquire_at("1.2.3.4", now).await);
    }
}
