//! Core bounded-concurrency primitives.

pub mod error;
pub mod resource_pool;
pub mod runner;
pub mod worker_pool;

pub use error::{AppResult, PoolError};
pub use resource_pool::{Closable, ResourcePool};
pub use runner::{InterruptHandle, RunnerError, TaskRunner};
pub use worker_pool::WorkerPool;
