//! Error types for VidStack configuration.

/// Errors raised while validating accounts and clouds.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A mandatory option is absent or empty.
    #[error("invalid configuration: [{section}] `{entry}` is missing option `{option}`")]
    MissingOption {
        /// Configuration section (`accounts` or `clouds`).
        section: &'static str,
        /// Entry name within the section.
        entry: String,
        /// Name of the missing option.
        option: &'static str,
    },

    /// A cloud references an account that was never registered.
    #[error("invalid configuration: [clouds] `{cloud}` references unknown account `{account}`")]
    UnknownAccount {
        /// Cloud entry name.
        cloud: String,
        /// Referenced account name.
        account: String,
    },

    /// Lookup of a name that is not registered.
    #[error("invalid configuration: no [{section}] entry named `{entry}`")]
    NotFound {
        /// Configuration section (`accounts` or `clouds`).
        section: &'static str,
        /// Requested entry name.
        entry: String,
    },

    /// The configuration document could not be parsed.
    #[error("invalid configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Convenience result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;
