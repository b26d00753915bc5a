//! Read and write glue over the [`Execute`] and [`Query`] trait seams.
//!
//! [`Database`] and [`Transaction`] carry no SQL semantics of their own: they
//! build write statements with the [`crate::sql::statement`] builders and
//! pass reads through verbatim, handing both to the backend adapter. Every
//! failure is an explicit `Result`: an executor error inside a transaction
//! surfaces to the caller, who decides whether to roll back.

use crate::core::AppResult;
use crate::sql::statement::{build_delete, build_insert, build_update, FieldMap, InsertKind, SqlValue};

/// Outcome of executing a write statement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExecOutcome {
    /// Identifier generated for the last inserted row, if any.
    pub last_insert_id: i64,
    /// Number of rows the statement affected.
    pub rows_affected: u64,
}

/// Executes a parameterized statement against some backend.
pub trait Execute {
    /// Execute `sql` with `params` bound to its `?` placeholders.
    fn execute(&mut self, sql: &str, params: &[SqlValue]) -> AppResult<ExecOutcome>;
}

/// Runs parameterized read statements against some backend.
///
/// The row representation is the adapter's own; the seam only routes SQL and
/// parameters through, mirroring [`Execute`] on the write side.
pub trait Query {
    /// Multi-row result set produced by [`Query::query`].
    type Rows;
    /// Single row produced by [`Query::query_one`].
    type Row;

    /// Run `sql` with `params` bound, returning the full result set.
    fn query(&mut self, sql: &str, params: &[SqlValue]) -> AppResult<Self::Rows>;

    /// Run `sql` with `params` bound, returning the first row, if any.
    fn query_one(&mut self, sql: &str, params: &[SqlValue]) -> AppResult<Option<Self::Row>>;
}

/// A transaction handle: an executor that can also commit or roll back.
pub trait TxHandle: Execute {
    /// Commit the transaction, consuming it.
    fn commit(self) -> AppResult<()>;
    /// Roll the transaction back, consuming it.
    fn rollback(self) -> AppResult<()>;
}

/// A connection-like executor that can open transactions.
pub trait Connect: Execute {
    /// The transaction handle type this connection produces.
    type Tx: TxHandle;

    /// Begin a transaction.
    fn begin(&mut self) -> AppResult<Self::Tx>;
}

/// Write helpers over a connection.
pub struct Database<C: Connect> {
    conn: C,
}

impl<C: Connect> Database<C> {
    /// Wrap a connection.
    pub fn new(conn: C) -> Self {
        Self { conn }
    }

    /// Insert a row, returning the last-inserted identifier.
    pub fn insert(&mut self, fields: FieldMap, table: &str) -> AppResult<i64> {
        insert_with(&mut self.conn, fields, table, InsertKind::Insert)
    }

    /// Insert a row with `INSERT IGNORE`, returning the last-inserted
    /// identifier.
    pub fn ignore(&mut self, fields: FieldMap, table: &str) -> AppResult<i64> {
        insert_with(&mut self.conn, fields, table, InsertKind::InsertIgnore)
    }

    /// Insert a row with `REPLACE`, returning the last-inserted identifier.
    pub fn replace(&mut self, fields: FieldMap, table: &str) -> AppResult<i64> {
        insert_with(&mut self.conn, fields, table, InsertKind::Replace)
    }

    /// Update rows matching `where_clause`, returning the affected-row count.
    pub fn update(
        &mut self,
        fields: FieldMap,
        table: &str,
        where_clause: &str,
        where_args: &[SqlValue],
    ) -> AppResult<u64> {
        update_with(&mut self.conn, fields, table, where_clause, where_args)
    }

    /// Delete rows matching `where_clause`, returning the affected-row count.
    pub fn delete(
        &mut self,
        table: &str,
        where_clause: &str,
        where_args: &[SqlValue],
    ) -> AppResult<u64> {
        delete_with(&mut self.conn, table, where_clause, where_args)
    }

    /// Begin a transaction over this connection.
    pub fn begin(&mut self) -> AppResult<Transaction<C::Tx>> {
        Ok(Transaction {
            tx: self.conn.begin()?,
        })
    }
}

impl<C: Connect + Query> Database<C> {
    /// Run a query, returning the full result set.
    pub fn query(&mut self, sql: &str, params: &[SqlValue]) -> AppResult<C::Rows> {
        self.conn.query(sql, params)
    }

    /// Run a query, returning the first row, if any.
    pub fn query_one(&mut self, sql: &str, params: &[SqlValue]) -> AppResult<Option<C::Row>> {
        self.conn.query_one(sql, params)
    }
}

/// Write helpers over an open transaction.
pub struct Transaction<T: TxHandle> {
    tx: T,
}

impl<T: TxHandle> Transaction<T> {
    /// Insert a row inside the transaction.
    pub fn insert(&mut self, fields: FieldMap, table: &str) -> AppResult<i64> {
        insert_with(&mut self.tx, fields, table, InsertKind::Insert)
    }

    /// `INSERT IGNORE` a row inside the transaction.
    pub fn ignore(&mut self, fields: FieldMap, table: &str) -> AppResult<i64> {
        insert_with(&mut self.tx, fields, table, InsertKind::InsertIgnore)
    }

    /// `REPLACE` a row inside the transaction.
    pub fn replace(&mut self, fields: FieldMap, table: &str) -> AppResult<i64> {
        insert_with(&mut self.tx, fields, table, InsertKind::Replace)
    }

    /// Update rows inside the transaction.
    pub fn update(
        &mut self,
        fields: FieldMap,
        table: &str,
        where_clause: &str,
        where_args: &[SqlValue],
    ) -> AppResult<u64> {
        update_with(&mut self.tx, fields, table, where_clause, where_args)
    }

    /// Delete rows inside the transaction.
    pub fn delete(
        &mut self,
        table: &str,
        where_clause: &str,
        where_args: &[SqlValue],
    ) -> AppResult<u64> {
        delete_with(&mut self.tx, table, where_clause, where_args)
    }

    /// Commit the transaction.
    pub fn commit(self) -> AppResult<()> {
        self.tx.commit()
    }

    /// Roll the transaction back.
    pub fn rollback(self) -> AppResult<()> {
        self.tx.rollback()
    }
}

impl<T: TxHandle + Query> Transaction<T> {
    /// Run a query inside the transaction, returning the full result set.
    pub fn query(&mut self, sql: &str, params: &[SqlValue]) -> AppResult<T::Rows> {
        self.tx.query(sql, params)
    }

    /// Run a query inside the transaction, returning the first row, if any.
    pub fn query_one(&mut self, sql: &str, params: &[SqlValue]) -> AppResult<Option<T::Row>> {
        self.tx.query_one(sql, params)
    }
}

fn insert_with<E: Execute>(
    exec: &mut E,
    fields: FieldMap,
    table: &str,
    kind: InsertKind,
) -> AppResult<i64> {
    let (sql, values) = build_insert(fields, table, kind);
    let outcome = exec.execute(&sql, &values)?;
    Ok(outcome.last_insert_id)
}

fn update_with<E: Execute>(
    exec: &mut E,
    fields: FieldMap,
    table: &str,
    where_clause: &str,
    where_args: &[SqlValue],
) -> AppResult<u64> {
    let (sql, values) = build_update(fields, table, where_clause, where_args);
    let outcome = exec.execute(&sql, &values)?;
    Ok(outcome.rows_affected)
}

fn delete_with<E: Execute>(
    exec: &mut E,
    table: &str,
    where_clause: &str,
    where_args: &[SqlValue],
) -> AppResult<u64> {
    let sql = build_delete(table, where_clause);
    let outcome = exec.execute(&sql, where_args)?;
    Ok(outcome.rows_affected)
}
