//! Dispatcher configuration.

use std::env;
use std::time::Duration;

/// Default user agent sent with every request.
pub const DEFAULT_USER_AGENT: &str = concat!("vidstack/", env!("CARGO_PKG_VERSION"));

/// Transport settings for [`crate::HttpDispatcher`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatcherConfig {
    /// URL scheme, `https` unless talking to a local stack.
    pub scheme: String,
    /// Total request timeout. `None` waits indefinitely.
    pub timeout: Option<Duration>,
    /// TCP connect timeout.
    pub connect_timeout: Duration,
    /// `User-Agent` header value.
    pub user_agent: String,
}

impl DispatcherConfig {
    /// Create configuration from environment variables.
    ///
    /// Reads `VIDSTACK_SCHEME`, `VIDSTACK_TIMEOUT_SECS` (`0` disables the
    /// timeout) and `VIDSTACK_CONNECT_TIMEOUT_SECS`. Unset or unparsable
    /// values fall back to the defaults.
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            scheme: env::var("VIDSTACK_SCHEME")
                .ok()
                .filter(|s| !s.is_empty())
                .unwrap_or(defaults.scheme),
            timeout: match env_secs("VIDSTACK_TIMEOUT_SECS") {
                Some(Duration::ZERO) => None,
                Some(timeout) => Some(timeout),
                None => defaults.timeout,
            },
            connect_timeout: env_secs("VIDSTACK_CONNECT_TIMEOUT_SECS")
                .unwrap_or(defaults.connect_timeout),
            user_agent: defaults.user_agent,
        }
    }

    /// Plain-HTTP configuration for local stacks and tests.
    #[must_use]
    pub fn insecure() -> Self {
        Self {
            scheme: "http".to_owned(),
            ..Self::default()
        }
    }
}

impl Default for DispatcherConfig {
    fn default() -> Self {
        Self {
            scheme: "https".to_owned(),
            timeout: Some(Duration::from_secs(60)),
            connect_timeout: Duration::from_secs(10),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
        }
    }
}

fn env_secs(key: &str) -> Option<Duration> {
    env::var(key)
        .ok()
        .and_then(|v| v.trim().parse::<u64>().ok())
        .map(Duration::from_secs)
}
