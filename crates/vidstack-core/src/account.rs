//! Account credentials and the named account store.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use tracing::debug;

use crate::error::{ConfigError, ConfigResult};

/// Credentials for one service account.
///
/// Immutable once created. The secret key is never printed by `Debug`.
#[derive(Clone, PartialEq, Eq)]
pub struct Account {
    access_key: String,
    secret_key: String,
    api_host: String,
}

impl Account {
    /// Create a new account from its access key, secret key, and API host.
    pub fn new(
        access_key: impl Into<String>,
        secret_key: impl Into<String>,
        api_host: impl Into<String>,
    ) -> Self {
        Self {
            access_key: access_key.into(),
            secret_key: secret_key.into(),
            api_host: api_host.into(),
        }
    }

    /// The public access key sent with every request.
    #[must_use]
    pub fn access_key(&self) -> &str {
        &self.access_key
    }

    /// The secret key used as HMAC key.
    #[must_use]
    pub fn secret_key(&self) -> &str {
        &self.secret_key
    }

    /// The API host (optionally with `:port`).
    #[must_use]
    pub fn api_host(&self) -> &str {
        &self.api_host
    }
}

impl fmt::Debug for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Account")
            .field("access_key", &self.access_key)
            .field("secret_key", &"***")
            .field("api_host", &self.api_host)
            .finish()
    }
}

/// In-memory store of named accounts.
///
/// Registering a name twice replaces the earlier account.
#[derive(Debug, Clone, Default)]
pub struct AccountRegistry {
    accounts: HashMap<String, Arc<Account>>,
}

impl AccountRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `account` under `name`, returning the account it replaced.
    pub fn register(&mut self, name: impl Into<String>, account: Account) -> Option<Arc<Account>> {
        let name = name.into();
        debug!(account = %name, access_key = %account.access_key(), "registering account");
        self.accounts.insert(name, Arc::new(account))
    }

    /// Look up an account by name.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NotFound`] if no account is registered under `name`.
    pub fn get(&self, name: &str) -> ConfigResult<Arc<Account>> {
        self.accounts
            .get(name)
            .cloned()
            .ok_or_else(|| ConfigError::NotFound {
                section: "accounts",
                entry: name.to_owned(),
            })
    }

    /// Whether an account is registered under `name`.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.accounts.contains_key(name)
    }

    /// Registered account names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.accounts.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Number of registered accounts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    /// Whether the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}
