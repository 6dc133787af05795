//! Configuration records for accounts and clouds.
//!
//! Records are plain serde structs so they can come from a JSON document, from
//! environment variables, or from code. Every option is optional at the type
//! level; [`VidStackConfig::validate`] decides what is mandatory.

use std::collections::BTreeMap;
use std::env;

use crate::account::{Account, AccountRegistry};
use crate::cloud::CloudRegistry;
use crate::error::{ConfigError, ConfigResult};

/// Name used for the account and cloud when none is given.
pub const DEFAULT_NAME: &str = "default";

/// API host used by [`VidStackConfig::from_env`] when `VIDSTACK_API_HOST` is unset.
pub const DEFAULT_API_HOST: &str = "api.vidstack.io";

/// Unvalidated account options.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AccountConfig {
    /// Public access key.
    pub access_key: Option<String>,
    /// Secret key.
    pub secret_key: Option<String>,
    /// API host, optionally with `:port`.
    pub api_host: Option<String>,
}

impl AccountConfig {
    /// Create a fully populated account record.
    pub fn new(
        access_key: impl Into<String>,
        secret_key: impl Into<String>,
        api_host: impl Into<String>,
    ) -> Self {
        Self {
            access_key: Some(access_key.into()),
            secret_key: Some(secret_key.into()),
            api_host: Some(api_host.into()),
        }
    }

    fn validate(&self, name: &str) -> ConfigResult<Account> {
        let access_key = required("accounts", name, "access_key", self.access_key.as_deref())?;
        let secret_key = required("accounts", name, "secret_key", self.secret_key.as_deref())?;
        let api_host = required("accounts", name, "api_host", self.api_host.as_deref())?;
        Ok(Account::new(access_key, secret_key, api_host))
    }
}

/// Unvalidated cloud options.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct CloudConfig {
    /// Service-side cloud id.
    pub id: Option<String>,
    /// Account name; `default` when absent.
    pub account: Option<String>,
}

impl CloudConfig {
    /// Create a cloud record bound to `account`.
    pub fn new(id: impl Into<String>, account: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            account: Some(account.into()),
        }
    }
}

/// The full set of account and cloud records.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct VidStackConfig {
    /// Accounts keyed by name.
    pub accounts: BTreeMap<String, AccountConfig>,
    /// Clouds keyed by name.
    pub clouds: BTreeMap<String, CloudConfig>,
}

impl VidStackConfig {
    /// Create an empty configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a configuration from a JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] if the document is not valid JSON of the
    /// expected shape. Missing options are only reported by [`Self::validate`].
    pub fn from_json(input: &str) -> ConfigResult<Self> {
        Ok(serde_json::from_str(input)?)
    }

    /// Build a single `default` account and cloud from environment variables.
    ///
    /// | Variable | Option |
    /// |----------|--------|
    /// | `VIDSTACK_ACCESS_KEY` | `accounts.default.access_key` |
    /// | `VIDSTACK_SECRET_KEY` | `accounts.default.secret_key` |
    /// | `VIDSTACK_API_HOST` | `accounts.default.api_host` (default `api.vidstack.io`) |
    /// | `VIDSTACK_CLOUD_ID` | `clouds.default.id` |
    #[must_use]
    pub fn from_env() -> Self {
        let account = AccountConfig {
            access_key: env::var("VIDSTACK_ACCESS_KEY").ok(),
            secret_key: env::var("VIDSTACK_SECRET_KEY").ok(),
            api_host: Some(
                env::var("VIDSTACK_API_HOST").unwrap_or_else(|_| DEFAULT_API_HOST.to_owned()),
            ),
        };
        let cloud = CloudConfig {
            id: env::var("VIDSTACK_CLOUD_ID").ok(),
            account: Some(DEFAULT_NAME.to_owned()),
        };

        Self::new()
            .with_account(DEFAULT_NAME, account)
            .with_cloud(DEFAULT_NAME, cloud)
    }

    /// Add or replace an account record.
    #[must_use]
    pub fn with_account(mut self, name: impl Into<String>, account: AccountConfig) -> Self {
        self.accounts.insert(name.into(), account);
        self
    }

    /// Add or replace a cloud record.
    #[must_use]
    pub fn with_cloud(mut self, name: impl Into<String>, cloud: CloudConfig) -> Self {
        self.clouds.insert(name.into(), cloud);
        self
    }

    /// Merge `other` into `self`; entries of `other` win on name clashes.
    pub fn merge(&mut self, other: Self) {
        self.accounts.extend(other.accounts);
        self.clouds.extend(other.clouds);
    }

    /// Validate every record and build the account and cloud registries.
    ///
    /// Accounts are validated first, so a cloud may reference any account in
    /// the same configuration.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found, in name order.
    pub fn validate(&self) -> ConfigResult<(AccountRegistry, CloudRegistry)> {
        let mut accounts = AccountRegistry::new();
        for (name, record) in &self.accounts {
            accounts.register(name.clone(), record.validate(name)?);
        }

        let mut clouds = CloudRegistry::new();
        for (name, record) in &self.clouds {
            let id = required("clouds", name, "id", record.id.as_deref())?;
            let account = record
                .account
                .as_deref()
                .filter(|a| !a.is_empty())
                .unwrap_or(DEFAULT_NAME);
            clouds.register(name.clone(), id, account, &accounts)?;
        }

        Ok((accounts, clouds))
    }
}

fn required<'a>(
    section: &'static str,
    entry: &str,
    option: &'static str,
    value: Option<&'a str>,
) -> ConfigResult<&'a str> {
    value
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ConfigError::MissingOption {
            section,
            entry: entry.to_owned(),
            option,
        })
}
