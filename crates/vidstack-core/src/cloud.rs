//! Named cloud records bound to registered accounts.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use crate::account::{Account, AccountRegistry};
use crate::error::{ConfigError, ConfigResult};

/// A validated cloud: the service-side cloud id and the account it signs with.
#[derive(Debug, Clone)]
pub struct CloudRecord {
    id: String,
    account_name: String,
    account: Arc<Account>,
}

impl CloudRecord {
    /// The cloud id used in request paths and signed as `cloud_id`.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Name of the account this cloud was registered against.
    #[must_use]
    pub fn account_name(&self) -> &str {
        &self.account_name
    }

    /// The account credentials.
    #[must_use]
    pub fn account(&self) -> &Arc<Account> {
        &self.account
    }
}

/// In-memory store of named clouds.
#[derive(Debug, Clone, Default)]
pub struct CloudRegistry {
    clouds: HashMap<String, CloudRecord>,
}

impl CloudRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register cloud `name` with service id `id`, resolving `account_name`
    /// against `accounts`. Re-registering a name replaces the earlier record.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownAccount`] if `account_name` is not in `accounts`.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        id: impl Into<String>,
        account_name: &str,
        accounts: &AccountRegistry,
    ) -> ConfigResult<()> {
        let name = name.into();
        let account = accounts
            .get(account_name)
            .map_err(|_| ConfigError::UnknownAccount {
                cloud: name.clone(),
                account: account_name.to_owned(),
            })?;
        let id = id.into();

        debug!(cloud = %name, cloud_id = %id, account = %account_name, "registering cloud");

        self.clouds.insert(
            name,
            CloudRecord {
                id,
                account_name: account_name.to_owned(),
                account,
            },
        );
        Ok(())
    }

    /// Look up a cloud by name.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NotFound`] if no cloud is registered under `name`.
    pub fn get(&self, name: &str) -> ConfigResult<&CloudRecord> {
        self.clouds.get(name).ok_or_else(|| ConfigError::NotFound {
            section: "clouds",
            entry: name.to_owned(),
        })
    }

    /// Registered cloud names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.clouds.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Number of registered clouds.
    #[must_use]
    pub fn len(&self) -> usize {
        self.clouds.len()
    }

    /// Whether the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.clouds.is_empty()
    }
}
