//! Idle-resource pool for expensive-to-create closable handles.
//!
//! The pool is a cache, not an admission-control gate: [`ResourcePool::acquire`]
//! never blocks and never limits how many resources are outstanding at once.
//! Only *idle* retention is bounded: a released resource that does not fit in
//! the idle store is closed on the spot (shed) rather than queued for.
//!
//! # Design
//!
//! - **Lock-free fast path**: `acquire` reads the idle channel with `try_recv`
//!   and does not touch the state mutex.
//! - **Shed, never block**: `release` either parks the resource in the idle
//!   store or closes it immediately; callers are never backpressured.
//! - **Terminal close**: the first `close` drains the idle store and closes
//!   every held resource concurrently, joining all closes before returning.

use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};
use parking_lot::Mutex;
use std::thread;
use tracing::{debug, info, warn};

use crate::config::ResourcePoolConfig;
use crate::core::{AppResult, PoolError};

/// A handle that can be released exactly once, e.g. a pooled connection.
///
/// This is the only capability [`ResourcePool`] requires of the resources it
/// manages; shedding and drain-on-close depend on nothing else.
pub trait Closable {
    /// Close the handle, consuming it.
    ///
    /// Failures reported here are swallowed (logged at most) when the pool
    /// closes the resource itself; they are never propagated to `release` or
    /// `close` callers.
    fn close(self) -> AppResult<()>;
}

/// A bounded cache of idle closable resources.
///
/// Resources are created lazily through the caller-supplied factory whenever
/// no idle resource is available. `idle_capacity` bounds retention only:
/// an arbitrary number of resources may be outstanding simultaneously.
///
/// # Precondition
///
/// Each acquired resource must be released **at most once**. The pool does not
/// track outstanding handles and cannot detect a double release.
pub struct ResourcePool<R, F>
where
    R: Closable + Send,
    F: Fn() -> AppResult<R>,
{
    /// Idle store. Both endpoints live here, so the channel never disconnects
    /// and an empty read always means "no idle resource", not "closed".
    idle_tx: Sender<R>,
    idle_rx: Receiver<R>,
    factory: F,
    /// Monotonic false -> true. Guards release/close against each other; the
    /// acquire fast path deliberately does not take it.
    closed: Mutex<bool>,
}

impl<R, F> ResourcePool<R, F>
where
    R: Closable + Send,
    F: Fn() -> AppResult<R>,
{
    /// Create a pool that retains at most `config.idle_capacity` idle
    /// resources.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::InvalidConfig`] if the capacity is zero; no pool
    /// is created in that case.
    pub fn new(factory: F, config: ResourcePoolConfig) -> Result<Self, PoolError> {
        config.validate().map_err(PoolError::InvalidConfig)?;

        let (idle_tx, idle_rx) = bounded(config.idle_capacity);
        info!(
            idle_capacity = config.idle_capacity,
            "resource pool created"
        );
        Ok(Self {
            idle_tx,
            idle_rx,
            factory,
            closed: Mutex::new(false),
        })
    }

    /// Take an idle resource, or create a fresh one through the factory.
    ///
    /// Never blocks. Factory errors are returned verbatim; the pool takes no
    /// recovery action.
    pub fn acquire(&self) -> AppResult<R> {
        match self.idle_rx.try_recv() {
            Ok(resource) => {
                debug!("acquire: reusing idle resource");
                Ok(resource)
            }
            Err(_) => {
                debug!("acquire: creating new resource");
                (self.factory)()
            }
        }
    }

    /// Return a previously acquired resource to the pool.
    ///
    /// If the pool is closed, or the idle store is already full, the resource
    /// is closed immediately instead of retained. Never blocks and never
    /// reports an error; a failing shed-close is logged and swallowed.
    pub fn release(&self, resource: R) {
        let closed = self.closed.lock();

        if *closed {
            debug!("release: pool closed, shedding");
            shed(resource);
            return;
        }

        match self.idle_tx.try_send(resource) {
            Ok(()) => debug!("release: retained in idle store"),
            Err(TrySendError::Full(resource)) => {
                debug!("release: idle store full, shedding");
                shed(resource);
            }
            Err(TrySendError::Disconnected(resource)) => {
                // Unreachable while the pool owns both endpoints.
                shed(resource);
            }
        }
    }

    /// Close the pool, draining and closing every idle resource.
    ///
    /// Each idle resource is closed on its own thread; this call returns only
    /// once all of those closes have finished. Idempotent: later calls are
    /// no-ops.
    pub fn close(&self) {
        let mut closed = self.closed.lock();
        if *closed {
            return;
        }
        *closed = true;

        let mut drained = Vec::new();
        while let Ok(resource) = self.idle_rx.try_recv() {
            drained.push(resource);
        }

        info!(idle = drained.len(), "closing resource pool");
        thread::scope(|scope| {
            for resource in drained {
                scope.spawn(move || shed(resource));
            }
        });
    }
}

/// Close a resource the pool will not retain, swallowing any failure.
fn shed<R: Closable>(resource: R) {
    if let Err(e) = resource.close() {
        warn!(error = %e, "failed to close shed resource");
    }
}
