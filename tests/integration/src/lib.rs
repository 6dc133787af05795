//! Integration tests for the VidStack client.
//!
//! Each test starts an in-process HTTP server on a random local port. The
//! server verifies every request signature the way the service does, records
//! what it received, and answers with canned responses.
//!
//! Run them with:
//! ```text
//! cargo test -p vidstack-integration
//! ```

use std::collections::VecDeque;
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::{Arc, Once};

use anyhow::Context;
use bytes::Bytes;
use http::header::CONTENT_TYPE;
use http::{Method, Request, Response, StatusCode};
use http_body_util::{BodyExt, Full};
use hyper::body::Incoming;
use hyper::service::service_fn;
use hyper_util::rt::{TokioExecutor, TokioIo};
use hyper_util::server::conn::auto::Builder as HttpConnBuilder;
use parking_lot::Mutex;
use percent_encoding::percent_decode_str;
use tokio::net::TcpListener;
use tracing::{debug, warn};
use vidstack_auth::{HmacSigner, Params};
use vidstack_client::{Cloud, VidStack};
use vidstack_core::{Account, AccountConfig, CloudConfig, VidStackConfig};
use vidstack_http::DispatcherConfig;

/// Access key the server accepts.
pub const ACCESS_KEY: &str = "AK";
/// Secret key the server verifies signatures with.
pub const SECRET_KEY: &str = "SK";
/// Cloud id of the default test cloud.
pub const CLOUD_ID: &str = "c1";

static INIT: Once = Once::new();

/// Initialize tracing (once).
fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .with_test_writer()
            .init();
    });
}

/// A file part received in a multipart body.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    /// Form field name.
    pub field: String,
    /// Reported file name.
    pub file_name: String,
    /// Part content.
    pub content: String,
}

/// One request as the server saw it.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    /// HTTP method.
    pub method: Method,
    /// URL path.
    pub path: String,
    /// Undecoded query string.
    pub raw_query: Option<String>,
    /// `Content-Type` header.
    pub content_type: Option<String>,
    /// Undecoded body.
    pub body: Bytes,
    /// Decoded parameters from the query, the form body, or the multipart text parts.
    pub params: Params,
    /// Files from a multipart body.
    pub files: Vec<UploadedFile>,
    /// Whether the signature verified.
    pub verified: bool,
}

#[derive(Debug)]
struct ServerState {
    account: Account,
    responses: Mutex<VecDeque<(StatusCode, String)>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

/// A signature-checking stand-in for the service.
#[derive(Debug, Clone)]
pub struct TestServer {
    addr: SocketAddr,
    state: Arc<ServerState>,
}

impl TestServer {
    /// Bind a random local port and start serving.
    pub async fn start() -> anyhow::Result<Self> {
        init_tracing();

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .context("cannot bind test server")?;
        let addr = listener.local_addr()?;
        let state = Arc::new(ServerState {
            account: Account::new(ACCESS_KEY, SECRET_KEY, addr.to_string()),
            responses: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
        });

        tokio::spawn(serve(listener, Arc::clone(&state)));
        debug!(%addr, "test server listening");
        Ok(Self { addr, state })
    }

    /// `host:port` of the server.
    #[must_use]
    pub fn host(&self) -> String {
        self.addr.to_string()
    }

    /// Queue a response. Unqueued requests get `200 {}`.
    pub fn respond(&self, status: u16, body: impl Into<String>) {
        let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        self.state.responses.lock().push_back((status, body.into()));
    }

    /// Queue a JSON response.
    pub fn respond_json(&self, status: u16, body: &serde_json::Value) {
        self.respond(status, body.to_string());
    }

    /// Every request received so far.
    #[must_use]
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.requests.lock().clone()
    }

    /// Configuration for a `default` cloud `c1` signing with `secret_key`.
    #[must_use]
    pub fn config_with_secret(&self, secret_key: &str) -> VidStackConfig {
        VidStackConfig::new()
            .with_account(
                "default",
                AccountConfig::new(ACCESS_KEY, secret_key, self.host()),
            )
            .with_cloud("default", CloudConfig::new(CLOUD_ID, "default"))
    }

    /// The default cloud, talking plain HTTP to this server.
    pub fn cloud(&self) -> anyhow::Result<Cloud> {
        cloud_for(self.config_with_secret(SECRET_KEY))
    }
}

/// Build the default cloud of `config` over plain HTTP.
pub fn cloud_for(config: VidStackConfig) -> anyhow::Result<Cloud> {
    let stack = VidStack::builder()
        .config(config)
        .dispatcher_config(DispatcherConfig::insecure())
        .build()?;
    Ok(stack.default_cloud()?)
}

async fn serve(listener: TcpListener, state: Arc<ServerState>) {
    let http = HttpConnBuilder::new(TokioExecutor::new());
    loop {
        let (stream, peer_addr) = match listener.accept().await {
            Ok(conn) => conn,
            Err(e) => {
                warn!(error = %e, "failed to accept connection");
                continue;
            }
        };

        let state = Arc::clone(&state);
        let svc = service_fn(move |req| handle(Arc::clone(&state), req));
        let conn = http.serve_connection(TokioIo::new(stream), svc).into_owned();

        tokio::spawn(async move {
            if let Err(e) = conn.await {
                warn!(%peer_addr, error = %e, "connection error");
            }
        });
    }
}

async fn handle(
    state: Arc<ServerState>,
    req: Request<Incoming>,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let (parts, body) = req.into_parts();
    let body = match body.collect().await {
        Ok(collected) => collected.to_bytes(),
        Err(e) => return Ok(reply(StatusCode::BAD_REQUEST, &format!(r#"{{"error":"{e}"}}"#))),
    };

    let content_type = parts
        .headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(ToOwned::to_owned);
    let raw_query = parts.uri.query().map(ToOwned::to_owned);

    let (params, files) = match content_type.as_deref() {
        Some(ct) if ct.starts_with("multipart/form-data") => {
            let boundary = ct.split("boundary=").nth(1).unwrap_or_default();
            parse_multipart(&String::from_utf8_lossy(&body), boundary)
        }
        Some(ct) if ct.starts_with("application/x-www-form-urlencoded") => {
            (parse_urlencoded(&String::from_utf8_lossy(&body)), Vec::new())
        }
        _ => (
            parse_urlencoded(raw_query.as_deref().unwrap_or_default()),
            Vec::new(),
        ),
    };

    let path = parts.uri.path().to_owned();
    let verified = HmacSigner
        .verify(&state.account, &parts.method, &path, &params)
        .is_ok();

    state.requests.lock().push(RecordedRequest {
        method: parts.method,
        path,
        raw_query,
        content_type,
        body,
        params,
        files,
        verified,
    });

    if !verified {
        return Ok(reply(
            StatusCode::UNAUTHORIZED,
            r#"{"error":"SignatureDoesNotMatch","message":"signature does not match"}"#,
        ));
    }

    let (status, body) = state
        .responses
        .lock()
        .pop_front()
        .unwrap_or_else(|| (StatusCode::OK, "{}".to_owned()));
    Ok(reply(status, &body))
}

fn reply(status: StatusCode, body: &str) -> Response<Full<Bytes>> {
    let mut response = Response::new(Full::new(Bytes::copy_from_slice(body.as_bytes())));
    *response.status_mut() = status;
    response
        .headers_mut()
        .insert(CONTENT_TYPE, http::HeaderValue::from_static("application/json"));
    response
}

fn decode(s: &str) -> String {
    percent_decode_str(s).decode_utf8_lossy().into_owned()
}

fn parse_urlencoded(input: &str) -> Params {
    input
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            (decode(key), decode(value))
        })
        .collect()
}

fn parse_multipart(body: &str, boundary: &str) -> (Params, Vec<UploadedFile>) {
    let mut params = Params::new();
    let mut files = Vec::new();

    for part in body.split(&format!("--{boundary}")).skip(1) {
        if part.starts_with("--") {
            break;
        }
        let part = part.strip_prefix("\r\n").unwrap_or(part);
        let Some((head, content)) = part.split_once("\r\n\r\n") else {
            continue;
        };
        let content = content.strip_suffix("\r\n").unwrap_or(content);
        let Some(name) = disposition(head, "name") else {
            continue;
        };
        match disposition(head, "filename") {
            Some(file_name) => files.push(UploadedFile {
                field: name,
                file_name,
                content: content.to_owned(),
            }),
            None => {
                params.insert(name, content.to_owned());
            }
        }
    }

    (params, files)
}

fn disposition(head: &str, key: &str) -> Option<String> {
    let needle = format!("; {key}=\"");
    let start = head.find(&needle)? + needle.len();
    let len = head[start..].find('"')?;
    Some(head[start..start + len].to_owned())
}

mod test_encode;
mod test_error;
mod test_params;
