//! Error types shared by the pool primitives.

use thiserror::Error;

/// Errors produced by pool construction and submission.
#[derive(Debug, Error)]
pub enum PoolError {
    /// Configuration validation failed; no pool was created.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    /// The pool has begun shutting down and accepts no further work.
    #[error("pool has been shut down")]
    Shutdown,
}

/// Application-facing result using anyhow for caller-supplied fallible code
/// (resource factories, closers, statement executors).
pub type AppResult<T> = Result<T, anyhow::Error>;
