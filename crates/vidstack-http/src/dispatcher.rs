//! The [`Dispatcher`] trait and its reqwest implementation.

use std::fmt;

use async_trait::async_trait;
use http::header::CONTENT_TYPE;
use reqwest::multipart::{Form, Part};
use tracing::debug;

use crate::config::DispatcherConfig;
use crate::error::TransportError;
use crate::request::{DispatchRequest, FORM_CONTENT_TYPE, FilePart, RawResponse};

/// Sends signed requests to the service.
#[async_trait]
pub trait Dispatcher: Send + Sync + fmt::Debug {
    /// Send `request` and return the response, whatever its status.
    async fn execute(&self, request: DispatchRequest) -> Result<RawResponse, TransportError>;
}

/// [`Dispatcher`] over a pooled [`reqwest::Client`].
#[derive(Debug, Clone)]
pub struct HttpDispatcher {
    client: reqwest::Client,
    scheme: String,
}

impl HttpDispatcher {
    /// Build a dispatcher from `config`.
    pub fn new(config: &DispatcherConfig) -> Result<Self, TransportError> {
        let mut builder = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout)
            .user_agent(config.user_agent.as_str())
            .redirect(reqwest::redirect::Policy::none());
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(TransportError::Client)?;
        Ok(Self::with_client(client, config.scheme.clone()))
    }

    /// Wrap an existing client.
    pub fn with_client(client: reqwest::Client, scheme: impl Into<String>) -> Self {
        Self {
            client,
            scheme: scheme.into(),
        }
    }

    /// URL scheme used for every request.
    #[must_use]
    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    fn build(&self, request: DispatchRequest) -> Result<reqwest::RequestBuilder, TransportError> {
        let url = request.url(&self.scheme);
        let builder = self.client.request(request.method.clone(), url);

        if request.params_in_query() {
            if request.file.is_some() {
                return Err(TransportError::InvalidRequest(format!(
                    "{} requests cannot carry a file",
                    request.method
                )));
            }
            return Ok(builder);
        }

        match request.file {
            Some(file) => {
                let mut form = Form::new();
                for (key, value) in request.params {
                    form = form.text(key, value);
                }
                let field = file.field.clone();
                Ok(builder.multipart(form.part(field, file_part(file)?)))
            }
            None => Ok(builder
                .header(CONTENT_TYPE, FORM_CONTENT_TYPE)
                .body(request.form_body())),
        }
    }
}

fn file_part(file: FilePart) -> Result<Part, TransportError> {
    let part = Part::bytes(file.bytes.to_vec()).file_name(file.file_name);
    match file.content_type {
        Some(content_type) => part
            .mime_str(&content_type)
            .map_err(|e| TransportError::InvalidRequest(format!("invalid content type: {e}"))),
        None => Ok(part),
    }
}

#[async_trait]
impl Dispatcher for HttpDispatcher {
    async fn execute(&self, request: DispatchRequest) -> Result<RawResponse, TransportError> {
        let url = request.url(&self.scheme);
        debug!(
            method = %request.method,
            %url,
            params = request.params.len(),
            multipart = request.file.is_some(),
            "dispatching request"
        );

        let response = self
            .build(request)?
            .send()
            .await
            .map_err(|e| TransportError::from_send(&url, e))?;

        let status = response.status();
        let headers = response.headers().clone();
        let body = response
            .bytes()
            .await
            .map_err(|e| TransportError::from_body(&url, e))?;

        debug!(%status, bytes = body.len(), "received response");
        Ok(RawResponse {
            status,
            headers,
            body,
        })
    }
}
