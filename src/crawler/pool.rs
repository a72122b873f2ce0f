//! Bounded worker pool
//!
//! An explicitly constructed executor that caps how many URL tasks run at
//! once. Tasks are spawned immediately but each waits for a permit from a
//! fair semaphore before doing any work, so admission is FIFO and excess
//! tasks queue instead of spawning unbounded concurrent fetches.

use std::future::Future;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinHandle;

/// A bounded executor shared by every job submitted to an orchestrator
///
/// Cloning is cheap and shares the same capacity; a task occupies one slot
/// for its full duration.
#[derive(Debug, Clone)]
pub struct WorkerPool {
    semaphore: Arc<Semaphore>,
    capacity: usize,
}

impl WorkerPool {
    /// Creates a pool with the given number of concurrent slots
    ///
    /// # Arguments
    ///
    /// * `capacity` - Maximum number of tasks running at once
    pub fn new(capacity: usize) -> Self {
        Self {
            semaphore: Arc::new(Semaphore::new(capacity)),
            capacity,
        }
    }

    /// Returns the pool's configured capacity
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Spawns a task that runs once a worker slot is free
    ///
    /// The returned handle resolves when the task completes; waiting tasks
    /// are admitted in submission order.
    pub fn spawn<F, T>(&self, future: F) -> JoinHandle<T>
    where
        F: Future<Output = T> + Send + 'static,
        T: Send + 'static,
    {
        let semaphore = self.semaphore.clone();
        tokio::spawn(async move {
            // Acquisition only fails if the semaphore is closed, which this
            // pool never does; in that case the task runs unthrottled.
            let _permit = semaphore.acquire_owned().await.ok();
            future.await
        })
    }
}
