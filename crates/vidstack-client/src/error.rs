//! The error taxonomy of every facade operation.

use vidstack_auth::SigningError;
use vidstack_core::ConfigError;
use vidstack_http::TransportError;
use vidstack_model::MalformedResponse;

/// Any failure of a VidStack operation.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The configuration is incomplete or names something unknown.
    #[error(transparent)]
    InvalidConfiguration(#[from] ConfigError),

    /// The request could not be signed.
    #[error(transparent)]
    Signing(#[from] SigningError),

    /// The request could not be exchanged with the service.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The service answered with a status outside 2xx.
    #[error("API error (HTTP {status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Error message reported by the service.
        message: String,
    },

    /// A 2xx response did not match the entity schema.
    #[error(transparent)]
    MalformedResponse(#[from] MalformedResponse),
}

impl Error {
    /// HTTP status of an [`Error::Api`].
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether the service reported that the entity does not exist.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

/// Convenience result type for VidStack operations.
pub type Result<T> = std::result::Result<T, Error>;
