//! Bounded worker pool shared by every request in the process.
//!
//! Work runs on the tokio runtime; the pool only caps how many location
//! resolutions are in flight at once. Callers that cannot get a slot within
//! the acquire timeout fail with [`SearchError::PoolExhausted`].

use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};

use relax_core::AppConfig;
use serde::Serialize;
use tokio::sync::Semaphore;

use crate::error::SearchError;

#[derive(Debug, Clone, Copy)]
pub struct PoolConfig {
    /// Maximum concurrent units of work. Values below 1 are raised to 1.
    pub max_workers: usize,
    pub acquire_timeout: Duration,
}

impl PoolConfig {
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            max_workers: config.worker_pool_size,
            acquire_timeout: config.pool_acquire_timeout(),
        }
    }
}

/// Point-in-time view of pool utilisation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PoolMetrics {
    pub capacity: usize,
    /// Units currently holding a slot.
    pub active: usize,
    /// Units waiting for a slot.
    pub queued: usize,
}

#[derive(Debug)]
pub struct WorkerPool {
    semaphore: Semaphore,
    capacity: usize,
    acquire_timeout: Duration,
    active: AtomicUsize,
    queued: AtomicUsize,
}

impl WorkerPool {
    #[must_use]
    pub fn new(config: PoolConfig) -> Self {
        let capacity = config.max_workers.max(1);
        Self {
            semaphore: Semaphore::new(capacity),
            capacity,
            acquire_timeout: config.acquire_timeout,
            active: AtomicUsize::new(0),
            queued: AtomicUsize::new(0),
        }
    }

    /// Runs `work` once a slot is free, holding the slot until it finishes.
    ///
    /// Dropping the returned future (e.g. on a timeout) releases the slot
    /// and keeps the metrics accurate.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::PoolExhausted`] if no slot frees up within the
    /// configured acquire timeout. `work` is not polled in that case.
    pub async fn run<F>(&self, work: F) -> Result<F::Output, SearchError>
    where
        F: Future,
    {
        let permit = {
            let _queued = CounterGuard::enter(&self.queued);
            let started = Instant::now();
            match tokio::time::timeout(self.acquire_timeout, self.semaphore.acquire()).await {
                Ok(Ok(permit)) => permit,
                // The semaphore is never closed; treat it like saturation.
                Ok(Err(_)) | Err(_) => {
                    let waited_ms =
                        u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
                    tracing::warn!(
                        waited_ms,
                        capacity = self.capacity,
                        "worker pool saturated"
                    );
                    return Err(SearchError::PoolExhausted { waited_ms });
                }
            }
        };

        let _active = CounterGuard::enter(&self.active);
        let output = work.await;
        drop(permit);
        Ok(output)
    }

    #[must_use]
    pub fn metrics(&self) -> PoolMetrics {
        PoolMetrics {
            capacity: self.capacity,
            active: self.active.load(Ordering::Relaxed),
            queued: self.queued.load(Ordering::Relaxed),
        }
    }
}

/// Increments a gauge on creation and decrements it on drop.
struct CounterGuard<'a>(&'a AtomicUsize);

impl<'a> CounterGuard<'a> {
    fn enter(counter: &'a AtomicUsize) -> Self {
        counter.fetch_add(1, Ordering::Relaxed);
        Self(counter)
    }
}

impl Drop for CounterGuard<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::Relaxed);
    }
}
