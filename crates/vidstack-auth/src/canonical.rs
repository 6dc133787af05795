//! Canonical string construction for request signing.
//!
//! The same encoding function produces the canonical query that is signed and
//! the query string or form body that is transmitted, so both always agree
//! byte for byte.

use std::collections::BTreeMap;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

/// Flat request parameters, ordered by key in ascending byte order.
pub type Params = BTreeMap<String, String>;

/// Characters that must be percent-encoded in keys and values.
///
/// Everything except the RFC 3986 unreserved characters
/// (A-Z, a-z, 0-9, `-`, `_`, `.`, `~`) is encoded. Space is `%20`, never `+`.
const ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Percent-encode a key, value, or path segment.
///
/// # Examples
///
/// ```
/// use vidstack_auth::canonical::percent_encode;
///
/// assert_eq!(percent_encode("a b&c"), "a%20b%26c");
/// assert_eq!(percent_encode("file-1_v2.mp4~"), "file-1_v2.mp4~");
/// ```
#[must_use]
pub fn percent_encode(input: &str) -> String {
    utf8_percent_encode(input, ENCODE_SET).to_string()
}

/// Build the canonical query: `key=value` pairs sorted by key, joined by `&`.
///
/// # Examples
///
/// ```
/// use vidstack_auth::canonical::{Params, build_canonical_query};
///
/// let params = Params::from([
///     ("b".to_owned(), "2".to_owned()),
///     ("a".to_owned(), "1".to_owned()),
/// ]);
/// assert_eq!(build_canonical_query(&params), "a=1&b=2");
/// ```
#[must_use]
pub fn build_canonical_query(params: &Params) -> String {
    params
        .iter()
        .map(|(k, v)| format!("{}={}", percent_encode(k), percent_encode(v)))
        .collect::<Vec<_>>()
        .join("&")
}

/// Build the string to sign from its components.
///
/// ```text
/// METHOD\n
/// host\n
/// /path\n
/// CanonicalQuery
/// ```
///
/// `params` must already contain the metadata parameters and must not contain
/// the signature or any file field.
#[must_use]
pub fn build_string_to_sign(method: &str, api_host: &str, path: &str, params: &Params) -> String {
    format!(
        "{}\n{}\n{}\n{}",
        method.to_ascii_uppercase(),
        api_host.to_ascii_lowercase(),
        path,
        build_canonical_query(params)
    )
}
