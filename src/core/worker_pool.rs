//! Fixed-size worker pool with synchronous task handoff.
//!
//! The pool spawns a fixed number of dedicated OS threads at construction.
//! There is no internal queue: tasks pass through a zero-capacity channel, so
//! [`WorkerPool::submit`] blocks until some worker is free to accept the
//! handoff. That blocking is the pool's backpressure mechanism: producers
//! can never outrun the workers.
//!
//! # Shutdown
//!
//! [`WorkerPool::shutdown`] drops the intake sender and joins every worker.
//! A worker only exits once its receive loop observes the disconnect, which
//! cannot happen before it has finished any task it already accepted, so
//! `shutdown` returns only after all submitted tasks have completed.

use crossbeam_channel::{bounded, Receiver, Sender};
use parking_lot::Mutex;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};
use tracing::{debug, error, info};

use crate::config::WorkerPoolConfig;
use crate::core::PoolError;

/// A unit of work handed to a worker.
type Task = Box<dyn FnOnce() + Send + 'static>;

/// A pool of `worker_count` persistent worker threads.
///
/// Tasks are executed exactly once by exactly one worker, in no particular
/// order relative to each other (first free worker wins).
pub struct WorkerPool {
    /// Intake sender. `None` once shutdown has begun; dropping it is what
    /// unblocks idle workers.
    intake: Mutex<Option<Sender<Task>>>,
    workers: Mutex<Vec<JoinHandle<()>>>,
    shutdown: AtomicBool,
    worker_count: usize,
}

impl WorkerPool {
    /// Spawn `config.worker_count` worker threads and return the pool.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::InvalidConfig`] if the configuration is invalid
    /// (e.g. a worker count of zero); no threads are spawned in that case.
    pub fn new(config: WorkerPoolConfig) -> Result<Self, PoolError> {
        config.validate().map_err(PoolError::InvalidConfig)?;

        // Zero capacity: every send is a rendezvous with a free worker.
        let (intake_tx, intake_rx) = bounded::<Task>(0);

        let mut workers = Vec::with_capacity(config.worker_count);
        for worker_id in 0..config.worker_count {
            workers.push(spawn_worker(worker_id, &config, intake_rx.clone())?);
        }

        info!(
            worker_count = config.worker_count,
            "worker pool initialized"
        );
        Ok(Self {
            intake: Mutex::new(Some(intake_tx)),
            workers: Mutex::new(workers),
            shutdown: AtomicBool::new(false),
            worker_count: config.worker_count,
        })
    }

    /// Hand a task to the first free worker, blocking until one accepts it.
    ///
    /// A task that panics is caught and logged by the worker; it does not
    /// take the worker thread down and is not reported back to the submitter.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::Shutdown`] if the pool has begun shutting down.
    pub fn submit<T>(&self, task: T) -> Result<(), PoolError>
    where
        T: FnOnce() + Send + 'static,
    {
        if self.shutdown.load(Ordering::Acquire) {
            return Err(PoolError::Shutdown);
        }

        // Clone the sender out of the mutex so no lock is held while parked
        // on the rendezvous.
        let intake = {
            let guard = self.intake.lock();
            match guard.as_ref() {
                Some(tx) => tx.clone(),
                None => return Err(PoolError::Shutdown),
            }
        };

        // Blocks until a worker receives. If shutdown races us and the last
        // receiver-side disconnect wins, the send fails and the task is
        // returned here rather than silently dropped.
        intake
            .send(Box::new(task))
            .map_err(|_| PoolError::Shutdown)
    }

    /// Number of worker threads this pool was built with.
    #[must_use]
    pub fn worker_count(&self) -> usize {
        self.worker_count
    }

    /// Shut the pool down, waiting for every worker to drain and exit.
    ///
    /// All tasks submitted before shutdown began are guaranteed to have
    /// completed by the time this returns. Idempotent: later calls (and calls
    /// racing the first) return without waiting.
    pub fn shutdown(&self) {
        if self.shutdown.swap(true, Ordering::AcqRel) {
            return;
        }

        info!("shutting down worker pool");

        // Dropping the sender disconnects the channel once in-flight handoffs
        // are consumed, which ends each worker's receive loop.
        {
            let mut intake = self.intake.lock();
            *intake = None;
        }

        let mut workers = self.workers.lock();
        for worker in workers.drain(..) {
            if worker.join().is_err() {
                error!("worker thread panicked outside task execution");
            }
        }

        info!(worker_count = self.worker_count, "worker pool shut down");
    }
}

impl Drop for WorkerPool {
    fn drop(&mut self) {
        // Unblock workers but do not join them here; explicit shutdown() is
        // required for a guaranteed drain.
        if !self.shutdown.swap(true, Ordering::AcqRel) {
            let mut intake = self.intake.lock();
            *intake = None;
            debug!("worker pool dropped without explicit shutdown; workers detached");
        }
    }
}

/// Spawn one worker thread running the receive loop.
fn spawn_worker(
    worker_id: usize,
    config: &WorkerPoolConfig,
    intake_rx: Receiver<Task>,
) -> Result<JoinHandle<()>, PoolError> {
    thread::Builder::new()
        .name(format!("{}-{worker_id}", config.thread_name_prefix))
        .stack_size(config.thread_stack_size)
        .spawn(move || {
            debug!(worker_id, "worker thread started");

            // Blocking recv; returns Err once the sender is dropped and all
            // in-flight handoffs are drained.
            while let Ok(task) = intake_rx.recv() {
                // Isolate task failures: a panicking task must not kill the
                // worker, or the pool would silently lose capacity.
                if catch_unwind(AssertUnwindSafe(task)).is_err() {
                    error!(worker_id, "task panicked; worker continues");
                }
            }

            debug!(worker_id, "worker thread exiting");
        })
        .map_err(|e| PoolError::InvalidConfig(format!("failed to spawn worker thread: {e}")))
}
