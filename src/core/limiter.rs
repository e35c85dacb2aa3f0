// per-client token buckets

use std::collections::HashMap;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

// tracked keys before idle buckets are swept
const PRUNE_AT: usize = 1024;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RateLimit {
    pub capacity: f64,
    pub refill_per_sec: f64,
}

impl RateLimit {
    /// `count` requests per `window`, refilled evenly.
    pub fn per(count: u32, window: Duration) -> Self {
        Self {
            capacity: f64::from(count),
            refill_per_sec: f64::from(count) / window.as_secs_f64(),
        }
    }

    pub fn per_minute(count: u32) -> Self {
        Self::per(count, Duration::from_secs(60))
    }

    pub fn per_hour(count: u32) -> Self {
        Self::per(count, Duration::from_secs(60 * 60))
    }

    pub fn per_day(count: u32) -> Self {
        Self::per(count, Duration::from_secs(24 * 60 * 60))
    }
}

#[derive(Debug, Clone)]
struct Bucket {
    tokens: f64,
    last_refill: Instant,
}

impl Bucket {
    fn refill(&mut self, limit: &RateLimit, now: Instant) {
        let elapsed = now.duration_since(self.last_refill).as_secs_f64();
        self.last_refill = now;
        self.tokens = (self.tokens + elapsed * limit.refill_per_sec).min(limit.capacity);
    }
}

struct Buckets {
    map: HashMap<String, Bucket>,
    prune_at: usize,
}

impl Buckets {
    // a full bucket holds nothing a fresh one would not
    fn prune(&mut self, limit: &RateLimit, now: Instant) {
        self.map.retain(|_, bucket| {
            bucket.refill(limit, now);
            bucket.tokens < limit.capacity
        });
        self.prune_at = PRUNE_AT.max(self.map.len() * 2);
    }
}

pub struct RateLimiter {
    limit: RateLimit,
    buckets: Mutex<Buckets>,
}

impl RateLimiter {
    pub fn new(limit: RateLimit) -> Self {
        Self {
            limit,
            buckets: Mutex::new(Buckets {
                map: HashMap::new(),
                prune_at: PRUNE_AT,
            }),
        }
    }

    /// Takes one token for `key`, false when the bucket is empty.
    pub async fn allow(&self, key: &str) -> bool {
        Self::allow_all(&[self], key).await
    }

    /// Takes one token from every limiter for `key`, or none at all when
    /// any of them is empty.
    pub async fn allow_all(limiters: &[&RateLimiter], key: &str) -> bool {
        let now = Instant::now();

        // always locked in slice order
        let mut guards = Vec::with_capacity(limiters.len());
        for limiter in limiters {
            guards.push(limiter.buckets.lock().await);
        }

        let mut ready = true;
        for (limiter, buckets) in limiters.iter().zip(guards.iter_mut()) {
            if buckets.map.len() >= buckets.prune_at {
                buckets.prune(&limiter.limit, now);
            }
            let bucket = buckets.map.entry(key.to_string()).or_insert_with(|| Bucket {
                tokens: limiter.limit.capacity,
                last_refill: now,
            });
            bucket.refill(&limiter.limit, now);
            ready &= bucket.tokens >= 1.0;
        }

        if ready {
            for buckets in guards.iter_mut() {
                if let Some(bucket) = buckets.map.get_mut(key) {
                    bucket.tokens -= 1.0;
                }
            }
        }
        ready
    }

    /// Drops buckets that have refilled completely.
    pub async fn prune(&self) {
        let mut buckets = self.buckets.lock().await;
        buckets.prune(&self.limit, Instant::now());
    }

    /// Number of clients currently tracked.
    pub async fn tracked(&self) -> usize {
        self.buckets.lock().await.map.len()
    }
}
