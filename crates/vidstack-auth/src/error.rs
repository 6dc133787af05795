//! Error types for request signing.

/// Errors that can occur while signing or verifying a request.
#[derive(Debug, thiserror::Error)]
pub enum SigningError {
    /// The HTTP method is not one the service accepts.
    #[error("unsupported HTTP method: {0}")]
    UnsupportedMethod(String),

    /// A caller parameter collides with a reserved metadata key.
    #[error("parameter `{0}` collides with a reserved signing key")]
    ReservedKey(String),

    /// The account has an empty secret key.
    #[error("account `{0}` has an empty secret key")]
    MissingSecret(String),

    /// A signed parameter set carries no `signature`.
    #[error("missing signature parameter")]
    MissingSignature,

    /// The recomputed signature differs from the provided one.
    #[error("signature does not match")]
    SignatureDoesNotMatch,
}
