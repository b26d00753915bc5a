//! Parameterized statement builders.
//!
//! All builders emit `?` placeholders and backtick-quoted column names.
//! `FieldMap` is a `HashMap`, so the order of SET clauses across two
//! otherwise-identical calls is unspecified; the placeholder values are
//! always returned in the same order as the clauses they bind to.

use std::collections::HashMap;

/// A parameter value bound to a `?` placeholder.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    /// SQL NULL.
    Null,
    /// Boolean value.
    Bool(bool),
    /// Signed integer value.
    Int(i64),
    /// Unsigned integer value.
    UInt(u64),
    /// Floating-point value.
    Float(f64),
    /// Text value.
    Text(String),
    /// Raw byte value.
    Bytes(Vec<u8>),
}

impl From<bool> for SqlValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i64> for SqlValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<i32> for SqlValue {
    fn from(v: i32) -> Self {
        Self::Int(v.into())
    }
}

impl From<u64> for SqlValue {
    fn from(v: u64) -> Self {
        Self::UInt(v)
    }
}

impl From<f64> for SqlValue {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<&str> for SqlValue {
    fn from(v: &str) -> Self {
        Self::Text(v.to_owned())
    }
}

impl From<String> for SqlValue {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<Vec<u8>> for SqlValue {
    fn from(v: Vec<u8>) -> Self {
        Self::Bytes(v)
    }
}

/// Column name to value mapping for a single row write.
pub type FieldMap = HashMap<String, SqlValue>;

/// Which insert-family verb to emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertKind {
    /// `INSERT INTO`.
    Insert,
    /// `INSERT IGNORE INTO`.
    InsertIgnore,
    /// `REPLACE INTO`.
    Replace,
}

impl InsertKind {
    fn verb(self) -> &'static str {
        match self {
            Self::Insert => "INSERT",
            Self::InsertIgnore => "INSERT IGNORE",
            Self::Replace => "REPLACE",
        }
    }
}

/// Build an insert-family statement in `VERB INTO tbl SET ...` form.
pub fn build_insert(fields: FieldMap, table: &str, kind: InsertKind) -> (String, Vec<SqlValue>) {
    let (set_clause, values) = build_set_clause(fields);
    let sql = format!("{} INTO {table} SET {set_clause}", kind.verb());
    (sql, values)
}

/// Build an UPDATE statement; WHERE args are appended after the SET args.
pub fn build_update(
    fields: FieldMap,
    table: &str,
    where_clause: &str,
    where_args: &[SqlValue],
) -> (String, Vec<SqlValue>) {
    let (set_clause, mut values) = build_set_clause(fields);
    let sql = format!("UPDATE {table} SET {set_clause} WHERE {where_clause}");
    values.extend_from_slice(where_args);
    (sql, values)
}

/// Build a DELETE statement. The WHERE args bind as-is, so only the SQL text
/// is returned.
pub fn build_delete(table: &str, where_clause: &str) -> String {
    format!("DELETE FROM {table} WHERE {where_clause}")
}

/// Render `` `col` = ?, ... `` and the values in matching order.
fn build_set_clause(fields: FieldMap) -> (String, Vec<SqlValue>) {
    let mut clauses = Vec::with_capacity(fields.len());
    let mut values = Vec::with_capacity(fields.len());
    for (field, value) in fields {
        clauses.push(format!("`{field}` = ?"));
        values.push(value);
    }
    (clauses.join(", "), values)
}
