//! In-memory dispatcher for unit tests.

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use http::{HeaderMap, StatusCode};
use parking_lot::Mutex;
use vidstack_auth::HmacSigner;
use vidstack_core::{AccountConfig, CloudConfig, VidStackConfig};
use vidstack_http::{DispatchRequest, Dispatcher, RawResponse, TransportError};
use vidstack_model::TransformerRegistry;

use crate::cloud::Cloud;

/// Records every request and answers with queued responses (`200 {}` once
/// the queue is empty).
#[derive(Debug, Default)]
pub(crate) struct RecordingDispatcher {
    requests: Mutex<Vec<DispatchRequest>>,
    responses: Mutex<VecDeque<RawResponse>>,
}

impl RecordingDispatcher {
    pub(crate) fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub(crate) fn respond(&self, status: u16, body: &str) {
        self.responses.lock().push_back(RawResponse {
            status: StatusCode::from_u16(status).unwrap(),
            headers: HeaderMap::new(),
            body: Bytes::copy_from_slice(body.as_bytes()),
        });
    }

    pub(crate) fn requests(&self) -> Vec<DispatchRequest> {
        self.requests.lock().clone()
    }

    pub(crate) fn last_request(&self) -> DispatchRequest {
        self.requests.lock().last().cloned().unwrap()
    }
}

pub(crate) trait SharedDispatcher {
    fn shared(&self) -> Arc<dyn Dispatcher>;
}

impl SharedDispatcher for Arc<RecordingDispatcher> {
    fn shared(&self) -> Arc<dyn Dispatcher> {
        Arc::clone(self) as Arc<dyn Dispatcher>
    }
}

#[async_trait]
impl Dispatcher for RecordingDispatcher {
    async fn execute(&self, request: DispatchRequest) -> Result<RawResponse, TransportError> {
        self.requests.lock().push(request);
        Ok(self.responses.lock().pop_front().unwrap_or_else(|| RawResponse {
            status: StatusCode::OK,
            headers: HeaderMap::new(),
            body: Bytes::from_static(b"{}"),
        }))
    }
}

pub(crate) fn test_config() -> VidStackConfig {
    VidStackConfig::new()
        .with_account("default", AccountConfig::new("AK", "SK", "api.example.com"))
        .with_cloud("default", CloudConfig::new("c1", "default"))
}

pub(crate) fn test_cloud(dispatcher: &Arc<RecordingDispatcher>) -> Cloud {
    let (_, clouds) = test_config().validate().unwrap();
    let record = clouds.get("default").unwrap();
    Cloud::new(
        "default",
        record.id(),
        Arc::clone(record.account()),
        Arc::new(HmacSigner),
        dispatcher.shared(),
        Arc::new(TransformerRegistry::default()),
    )
}
