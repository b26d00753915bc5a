//! Connection settings with explicit, documented override precedence.
//!
//! Replaces mutable global/default parameter maps with an immutable value
//! passed at construction: built-in defaults are fixed, and caller overrides
//! always win over them.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Built-in driver parameter defaults.
///
/// Mirrors the conventional settings for long-running write workloads: parse
/// temporal columns, generous read timeout, short write timeout, native
/// password auth.
const DEFAULT_PARAMS: [(&str, &str); 4] = [
    ("parseTime", "true"),
    ("readTimeout", "30m"),
    ("writeTimeout", "1m"),
    ("allowNativePasswords", "true"),
];

/// Immutable connection settings for a relational backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectOptions {
    /// Backend address, e.g. `127.0.0.1:3306`.
    pub host: String,
    /// Authentication user name.
    pub username: String,
    /// Authentication password.
    pub password: String,
    /// Schema (database) to use.
    pub schema: String,
    /// Connection character set.
    pub charset: String,
    /// Caller-supplied driver parameters. Take precedence over the built-in
    /// defaults and over `charset`.
    #[serde(default)]
    pub overrides: BTreeMap<String, String>,
}

impl ConnectOptions {
    /// Create options with no overrides.
    #[must_use]
    pub fn new(
        host: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
        schema: impl Into<String>,
        charset: impl Into<String>,
    ) -> Self {
        Self {
            host: host.into(),
            username: username.into(),
            password: password.into(),
            schema: schema.into(),
            charset: charset.into(),
            overrides: BTreeMap::new(),
        }
    }

    /// Add or replace a driver parameter override.
    #[must_use]
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.overrides.insert(key.into(), value.into());
        self
    }

    /// The effective driver parameters.
    ///
    /// Precedence, lowest to highest: built-in defaults, `charset`, then
    /// `overrides`.
    #[must_use]
    pub fn effective_params(&self) -> BTreeMap<String, String> {
        let mut params: BTreeMap<String, String> = DEFAULT_PARAMS
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        params.insert("charset".to_owned(), self.charset.clone());
        for (key, value) in &self.overrides {
            params.insert(key.clone(), value.clone());
        }
        params
    }

    /// Render a DSN: `username:password@tcp(host)/schema?k=v&...`.
    ///
    /// Parameters appear in sorted key order.
    #[must_use]
    pub fn dsn(&self) -> String {
        let params = self
            .effective_params()
            .into_iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join("&");
        format!(
            "{}:{}@tcp({})/{}?{params}",
            self.username, self.password, self.host, self.schema
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options() -> ConnectOptions {
        ConnectOptions::new("db:3306", "mole", "secret", "burrow", "utf8mb4")
    }

    #[test]
    fn defaults_are_applied() {
        let params = options().effective_params();
        assert_eq!(params["parseTime"], "true");
        assert_eq!(params["readTimeout"], "30m");
        assert_eq!(params["writeTimeout"], "1m");
        assert_eq!(params["charset"], "utf8mb4");
    }

    #[test]
    fn overrides_win_over_defaults() {
        let params = options()
            .with_param("readTimeout", "5m")
            .with_param("charset", "latin1")
            .effective_params();
        assert_eq!(params["readTimeout"], "5m");
        assert_eq!(params["charset"], "latin1");
    }

    #[test]
    fn dsn_shape() {
        let dsn = ConnectOptions::new("db:3306", "u", "p", "s", "utf8")
            .with_param("readTimeout", "1m")
            .dsn();
        assert!(dsn.starts_with("u:p@tcp(db:3306)/s?"));
        assert!(dsn.contains("readTimeout=1m"));
        assert!(dsn.contains("charset=utf8"));
    }
}
