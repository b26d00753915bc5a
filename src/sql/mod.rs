//! Driver-agnostic relational write glue.
//!
//! Builds parameterized INSERT/UPDATE/DELETE statements from field maps and
//! executes them through the [`Execute`] trait seam; reads route through the
//! [`Query`] seam. The crate ships no database driver; adapters implement
//! [`Execute`] and [`Query`] (and [`Connect`] for transactions) over whatever
//! client they use.

pub mod connect;
pub mod database;
pub mod statement;

pub use connect::ConnectOptions;
pub use database::{Connect, Database, ExecOutcome, Execute, Query, Transaction, TxHandle};
pub use statement::{build_delete, build_insert, build_update, FieldMap, InsertKind, SqlValue};
