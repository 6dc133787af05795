//! Outgoing requests and raw responses.

use bytes::Bytes;
use http::{HeaderMap, Method, StatusCode};
use vidstack_auth::{Params, build_canonical_query};

/// Content type of url-encoded form bodies.
pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// A binary part of a multipart body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePart {
    /// Form field name.
    pub field: String,
    /// File name reported to the service.
    pub file_name: String,
    /// MIME type, if known.
    pub content_type: Option<String>,
    /// File content.
    pub bytes: Bytes,
}

/// A signed request ready to be sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchRequest {
    /// HTTP method.
    pub method: Method,
    /// Host, with optional port.
    pub api_host: String,
    /// URL path, starting with `/`.
    pub path: String,
    /// Signed parameters, `signature` included.
    pub params: Params,
    /// File sent as a multipart part. Never part of the signature.
    pub file: Option<FilePart>,
}

impl DispatchRequest {
    /// Create a request without a file.
    pub fn new(
        method: Method,
        api_host: impl Into<String>,
        path: impl Into<String>,
        params: Params,
    ) -> Self {
        Self {
            method,
            api_host: api_host.into(),
            path: path.into(),
            params,
            file: None,
        }
    }

    /// Attach a file, turning the body into `multipart/form-data`.
    #[must_use]
    pub fn with_file(mut self, file: FilePart) -> Self {
        self.file = Some(file);
        self
    }

    /// Whether the parameters travel in the query string rather than the body.
    #[must_use]
    pub fn params_in_query(&self) -> bool {
        matches!(self.method, Method::GET | Method::DELETE | Method::HEAD)
    }

    /// Full request URL; carries the encoded parameters for query-style methods.
    #[must_use]
    pub fn url(&self, scheme: &str) -> String {
        let mut url = format!("{scheme}://{}{}", self.api_host, self.path);
        if self.params_in_query() && !self.params.is_empty() {
            url.push('?');
            url.push_str(&build_canonical_query(&self.params));
        }
        url
    }

    /// Url-encoded form body. Uses the signer's encoding so the service sees
    /// exactly the bytes that were signed.
    #[must_use]
    pub fn form_body(&self) -> String {
        build_canonical_query(&self.params)
    }
}

/// A response as received, before any interpretation.
#[derive(Debug, Clone)]
pub struct RawResponse {
    /// HTTP status.
    pub status: StatusCode,
    /// Response headers.
    pub headers: HeaderMap,
    /// Response body.
    pub body: Bytes,
}

impl RawResponse {
    /// Whether the status is 2xx.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Body decoded as UTF-8, replacing invalid sequences.
    #[must_use]
    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}
