//! HMAC-SHA256 request signing for the VidStack encoding API.
//!
//! Every request to the service carries a flat parameter set plus four
//! metadata parameters (`cloud_id`, `access_key`, `timestamp`,
//! `signature_version`) and a `signature`:
//!
//! ```text
//! StringToSign = UPPERCASE(method) + "\n" +
//!                lowercase(api_host) + "\n" +
//!                path + "\n" +
//!                CanonicalQuery
//!
//! Signature = Base64(HMAC-SHA256(SecretKey, StringToSign))
//! ```
//!
//! # Usage
//!
//! ```rust
//! use std::collections::BTreeMap;
//!
//! use vidstack_auth::{HmacSigner, RequestSigner, SigningRequest};
//! use vidstack_core::Account;
//!
//! let account = Account::new("AK", "SK", "api.example.com");
//! let params = BTreeMap::from([("profiles".to_owned(), "h264".to_owned())]);
//! let method = http::Method::POST;
//! let request = SigningRequest::new(&method, "/v2/c1/videos.json", &params);
//!
//! let signed = HmacSigner.sign(&account, "c1", &request).unwrap();
//! assert!(signed.params.contains_key("signature"));
//! ```
//!
//! # Modules
//!
//! - [`canonical`] - Percent-encoding table and canonical string construction
//! - [`error`] - Signing error types
//! - [`signer`] - The [`RequestSigner`] trait and the [`HmacSigner`] implementation

pub mod canonical;
pub mod error;
pub mod signer;

pub use canonical::{Params, build_canonical_query, build_string_to_sign, percent_encode};
pub use error::SigningError;
pub use signer::{
    HmacSigner, RESERVED_KEYS, RequestSigner, SIGNATURE_KEY, SIGNATURE_VERSION, SignedRequest,
    SigningRequest, format_timestamp,
};
