//! # Corral
//!
//! Bounded-concurrency primitives for managing scarce or parallelizable work.
//!
//! The crate provides three independent, composable building blocks:
//!
//! - [`core::ResourcePool`]: caches expensive-to-create closable handles.
//!   The pool bounds how many *idle* handles it retains, never how many are
//!   outstanding: `acquire` is non-blocking and falls back to a caller-supplied
//!   factory when the idle store is empty, and `release` sheds (closes) excess
//!   handles instead of blocking.
//! - [`core::WorkerPool`]: a fixed set of worker threads fed through a
//!   zero-capacity handoff channel. `submit` blocks until a worker is free,
//!   so producers are backpressured by worker availability; `shutdown` drains
//!   and joins every worker.
//! - [`core::TaskRunner`]: runs an ordered list of tasks on a background
//!   thread, racing completion against a one-shot deadline and an explicit,
//!   single-slot interrupt handle. Cancellation is cooperative: it is only
//!   observed between tasks, never mid-task.
//!
//! None of the primitives depends on another; a `TaskRunner` task may acquire
//! from a `ResourcePool` or submit to a `WorkerPool`, but nothing requires it.
//!
//! ## Example
//!
//! ```rust,ignore
//! use corral::config::WorkerPoolConfig;
//! use corral::core::WorkerPool;
//!
//! let pool = WorkerPool::new(WorkerPoolConfig::new().with_worker_count(3))?;
//! for job in jobs {
//!     pool.submit(move || job.run())?;
//! }
//! pool.shutdown(); // returns once every submitted job has completed
//! ```
//!
//! The [`sql`] module is a thin, driver-agnostic collaborator layer: it builds
//! parameterized write statements from field maps and executes them through
//! the [`sql::Execute`] trait seam. It shares no state with the core
//! primitives.

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Core concurrency primitives and their error types.
pub mod core;
/// Configuration models for pools and runners.
pub mod config;
/// Parameterized statement building and the execution trait seam.
pub mod sql;
/// Shared utilities.
pub mod util;
