//! Bounded worker pool for CPU-bound transform jobs.
//!
//! A fixed number of worker tasks drain a bounded job queue. Each job runs on
//! the blocking thread pool so transforms never stall the async runtime.
//! Calls that arrive while every worker is busy wait in the queue; once the
//! queue is full further calls are rejected.

use std::sync::Arc;

use tokio::sync::mpsc::error::TrySendError;
use tokio::sync::{Mutex, mpsc, oneshot};

type Job = Box<dyn FnOnce() + Send + 'static>;

/// Errors returned when a job cannot be run to completion.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PoolError {
    #[error("Worker queue full ({0} calls waiting)")]
    QueueFull(usize),

    #[error("Worker pool is shut down")]
    Closed,

    #[error("Transform worker stopped before replying")]
    WorkerLost,
}

/// Fixed-size pool of transform workers.
pub struct WorkerPool {
    tx: mpsc::Sender<Job>,
    workers: usize,
    queue_capacity: usize,
}

impl WorkerPool {
    /// Start `workers` worker tasks sharing a queue of `queue_capacity` slots.
    ///
    /// Must be called from within a tokio runtime.
    pub fn new(workers: usize, queue_capacity: usize) -> Self {
        let (tx, rx) = mpsc::channel::<Job>(queue_capacity.max(1));
        let rx = Arc::new(Mutex::new(rx));

        for id in 0..workers {
            tokio::spawn(worker_loop(id, rx.clone()));
        }
        tracing::info!(workers, queue_capacity, "Transform worker pool started");

        Self {
            tx,
            workers,
            queue_capacity,
        }
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    pub fn queue_capacity(&self) -> usize {
        self.queue_capacity
    }

    /// Calls currently waiting for a worker.
    pub fn queued(&self) -> usize {
        self.tx.max_capacity() - self.tx.capacity()
    }

    /// Enqueue `f` without waiting for it. Fails immediately if the queue is full.
    pub fn submit<T, F>(&self, f: F) -> Result<oneshot::Receiver<T>, PoolError>
    where
        F: FnOnce() -> T + Send + 'static,
        T: Send + 'static,
    {
        let (reply_tx, reply_rx) = oneshot::channel();
        let job: Job = Box::new(move || {
            // The caller may have gone away; the result is then discarded.
            let _ = reply_tx.send(f());
        });

        self.tx.try_send(job).map_err(|e| match e {
            TrySendError::Full(_) => PoolError::QueueFull(self.queue_capacity),
            TrySendError::Closed(_) => PoolError::Closed,
        })?;
        Ok(reply_rx)
    }

    /// Run `f` on a worker and wait for its result.
    pub async fn run<T, F>(&self, f: F) -> Result<T, PoolError>
    where
        F: FnOnce() -> T + Send + 'static,
        T: Send + 'static,
    {
        self.submit(f)?.await.map_err(|_| PoolError::WorkerLost)
    }
}

async fn worker_loop(id: usize, rx: Arc<Mutex<mpsc::Receiver<Job>>>) {
    loop {
        let job = {
            let mut rx = rx.lock().await;
            rx.recv().await
        };
        let Some(job) = job else { break };

        if let Err(e) = tokio::task::spawn_blocking(job).await {
            tracing::error!(worker = id, error = %e, "Transform job panicked");
        }
    }
    tracing::debug!(worker = id, "Transform worker stopped");
}
