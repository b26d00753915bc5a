//! Pool and runner configuration structures.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default stack size for worker threads (2 MiB).
const DEFAULT_THREAD_STACK_SIZE: usize = 2 * 1024 * 1024;

/// Configuration for [`crate::core::ResourcePool`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourcePoolConfig {
    /// Upper bound on *idle* resources retained. Does not cap how many
    /// resources may be outstanding at once.
    pub idle_capacity: usize,
}

impl ResourcePoolConfig {
    /// Create a configuration retaining at most `idle_capacity` idle
    /// resources.
    #[must_use]
    pub fn new(idle_capacity: usize) -> Self {
        Self { idle_capacity }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), String> {
        if self.idle_capacity == 0 {
            return Err("idle_capacity must be at least 1".into());
        }
        Ok(())
    }
}

/// Configuration for [`crate::core::WorkerPool`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkerPoolConfig {
    /// Number of persistent worker threads.
    #[serde(default = "default_worker_count")]
    pub worker_count: usize,
    /// Stack size for each worker thread, in bytes.
    #[serde(default = "default_thread_stack_size")]
    pub thread_stack_size: usize,
    /// Prefix for worker thread names (`<prefix>-<id>`).
    #[serde(default = "default_thread_name_prefix")]
    pub thread_name_prefix: String,
}

fn default_worker_count() -> usize {
    num_cpus::get()
}

fn default_thread_stack_size() -> usize {
    DEFAULT_THREAD_STACK_SIZE
}

fn default_thread_name_prefix() -> String {
    "corral-worker".into()
}

impl Default for WorkerPoolConfig {
    fn default() -> Self {
        Self {
            worker_count: default_worker_count(),
            thread_stack_size: default_thread_stack_size(),
            thread_name_prefix: default_thread_name_prefix(),
        }
    }
}

impl WorkerPoolConfig {
    /// Create a configuration with defaults: one worker per logical CPU.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the worker thread count.
    #[must_use]
    pub fn with_worker_count(mut self, worker_count: usize) -> Self {
        self.worker_count = worker_count;
        self
    }

    /// Set the per-thread stack size in bytes.
    #[must_use]
    pub fn with_thread_stack_size(mut self, bytes: usize) -> Self {
        self.thread_stack_size = bytes;
        self
    }

    /// Set the worker thread name prefix.
    #[must_use]
    pub fn with_thread_name_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.thread_name_prefix = prefix.into();
        self
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), String> {
        if self.worker_count == 0 {
            return Err("worker_count must be at least 1".into());
        }
        if self.thread_stack_size == 0 {
            return Err("thread_stack_size must be greater than 0".into());
        }
        Ok(())
    }
}

/// Configuration for [`crate::core::TaskRunner`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunnerConfig {
    /// Deadline for the whole task sequence, in milliseconds. The clock
    /// starts when the runner is constructed.
    pub deadline_ms: u64,
}

impl RunnerConfig {
    /// Create a configuration with the given deadline in milliseconds.
    #[must_use]
    pub fn new(deadline_ms: u64) -> Self {
        Self { deadline_ms }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), String> {
        if self.deadline_ms == 0 {
            return Err("deadline_ms must be greater than 0".into());
        }
        Ok(())
    }

    /// The deadline as a [`Duration`].
    #[must_use]
    pub fn deadline(&self) -> Duration {
        Duration::from_millis(self.deadline_ms)
    }
}
