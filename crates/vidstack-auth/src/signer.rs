//! Request signing.
//!
//! [`HmacSigner`] merges the caller's parameters with the signing metadata,
//! builds the string to sign, and attaches a base64 HMAC-SHA256 signature.
//! The only clock dependency is the timestamp, which callers can pin with
//! [`SigningRequest::with_timestamp`] to get reproducible signatures.

use std::fmt;

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use chrono::{DateTime, Utc};
use hmac::{Hmac, KeyInit, Mac};
use http::Method;
use sha2::Sha256;
use subtle::ConstantTimeEq;
use tracing::debug;
use vidstack_core::Account;

use crate::canonical::{Params, build_string_to_sign};
use crate::error::SigningError;

type HmacSha256 = Hmac<Sha256>;

/// Parameter name carrying the signature.
pub const SIGNATURE_KEY: &str = "signature";

/// Value of the `signature_version` parameter.
pub const SIGNATURE_VERSION: &str = "2";

/// Parameter names callers may not use.
pub const RESERVED_KEYS: [&str; 5] = [
    "cloud_id",
    "access_key",
    "timestamp",
    "signature_version",
    SIGNATURE_KEY,
];

const SIGNABLE_METHODS: [Method; 4] = [Method::GET, Method::POST, Method::PUT, Method::DELETE];

/// Everything that goes into a signature besides the account and cloud.
#[derive(Debug, Clone)]
pub struct SigningRequest<'a> {
    /// HTTP method.
    pub method: &'a Method,
    /// Full request path, e.g. `/v2/c1/videos.json`.
    pub path: &'a str,
    /// Flat caller parameters (no file fields).
    pub params: &'a Params,
    /// Explicit timestamp; `None` means "now".
    pub timestamp: Option<DateTime<Utc>>,
}

impl<'a> SigningRequest<'a> {
    /// Create a signing request stamped with the current time.
    #[must_use]
    pub fn new(method: &'a Method, path: &'a str, params: &'a Params) -> Self {
        Self {
            method,
            path,
            params,
            timestamp: None,
        }
    }

    /// Pin the timestamp.
    #[must_use]
    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }
}

/// The result of signing a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedRequest {
    /// Caller params plus metadata plus `signature`: what goes on the wire.
    pub params: Params,
    /// The base64 signature.
    pub signature: String,
    /// The exact string that was signed.
    pub string_to_sign: String,
}

/// Computes request signatures.
///
/// Implementations must be deterministic for a fixed timestamp and must not
/// keep per-request state, so one signer can serve concurrent calls.
pub trait RequestSigner: Send + Sync + fmt::Debug {
    /// Sign `request` for `cloud_id` with `account`'s secret key.
    ///
    /// # Errors
    ///
    /// Returns a [`SigningError`] for unsupported methods, reserved parameter
    /// names, or an empty secret key.
    fn sign(
        &self,
        account: &Account,
        cloud_id: &str,
        request: &SigningRequest<'_>,
    ) -> Result<SignedRequest, SigningError>;
}

/// The service's HMAC-SHA256 signature scheme.
#[derive(Debug, Clone, Copy, Default)]
pub struct HmacSigner;

impl HmacSigner {
    /// Verify a signed parameter set, as the service does on receipt.
    ///
    /// `params` is the full transmitted set including metadata and `signature`.
    ///
    /// # Errors
    ///
    /// Returns [`SigningError::MissingSignature`] if there is no signature and
    /// [`SigningError::SignatureDoesNotMatch`] if it is wrong.
    pub fn verify(
        &self,
        account: &Account,
        method: &Method,
        path: &str,
        params: &Params,
    ) -> Result<(), SigningError> {
        let mut unsigned = params.clone();
        let provided = unsigned
            .remove(SIGNATURE_KEY)
            .ok_or(SigningError::MissingSignature)?;

        let string_to_sign =
            build_string_to_sign(method.as_str(), account.api_host(), path, &unsigned);
        let expected = compute_signature(account.secret_key(), &string_to_sign);

        if provided.as_bytes().ct_eq(expected.as_bytes()).into() {
            debug!(access_key = %account.access_key(), "signature verification succeeded");
            Ok(())
        } else {
            debug!(expected = %expected, provided = %provided, "signature mismatch");
            Err(SigningError::SignatureDoesNotMatch)
        }
    }
}

impl RequestSigner for HmacSigner {
    fn sign(
        &self,
        account: &Account,
        cloud_id: &str,
        request: &SigningRequest<'_>,
    ) -> Result<SignedRequest, SigningError> {
        if !SIGNABLE_METHODS.contains(request.method) {
            return Err(SigningError::UnsupportedMethod(request.method.to_string()));
        }
        if account.secret_key().is_empty() {
            return Err(SigningError::MissingSecret(account.access_key().to_owned()));
        }
        if let Some(key) = request
            .params
            .keys()
            .find(|k| RESERVED_KEYS.contains(&k.as_str()))
        {
            return Err(SigningError::ReservedKey(key.clone()));
        }

        let timestamp = request.timestamp.unwrap_or_else(Utc::now);

        let mut params = request.params.clone();
        params.insert("cloud_id".to_owned(), cloud_id.to_owned());
        params.insert("access_key".to_owned(), account.access_key().to_owned());
        params.insert("timestamp".to_owned(), format_timestamp(&timestamp));
        params.insert(
            "signature_version".to_owned(),
            SIGNATURE_VERSION.to_owned(),
        );

        let string_to_sign = build_string_to_sign(
            request.method.as_str(),
            account.api_host(),
            request.path,
            &params,
        );

        debug!(string_to_sign = ?string_to_sign, "built string to sign");

        let signature = compute_signature(account.secret_key(), &string_to_sign);
        params.insert(SIGNATURE_KEY.to_owned(), signature.clone());

        Ok(SignedRequest {
            params,
            signature,
            string_to_sign,
        })
    }
}

/// Format a timestamp the way the service expects it:
/// RFC 3339 in UTC with microseconds, e.g. `2024-01-02T03:04:05.000000+00:00`.
#[must_use]
pub fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.format("%Y-%m-%dT%H:%M:%S%.6f+00:00").to_string()
}

/// Compute the base64 HMAC-SHA256 of `data` keyed by `secret_key`.
fn compute_signature(secret_key: &str, data: &str) -> String {
    let mut mac =
        HmacSha256::new_from_slice(secret_key.as_bytes()).expect("HMAC can accept keys of any length");
    mac.update(data.as_bytes());
    BASE64.encode(mac.finalize().into_bytes())
}
