//! The harness: configuration plus a transport.
//!
//! # Design
//! `Harness` owns no mutable state. Building a request is pure, sending goes
//! through the `Transport` seam, and checking is delegated to `Expectation`.
//! It is `Clone + Send + Sync`, so parallel tests can share one instance or
//! each construct their own against a different base URL.

use std::sync::Arc;

use crate::config::HarnessConfig;
use crate::error::HarnessError;
use crate::expect::Expectation;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::request::{join_url, RequestBuilder};
use crate::transport::{Transport, UreqTransport};

#[derive(Clone)]
pub struct Harness {
    config: HarnessConfig,
    transport: Arc<dyn Transport>,
}

impl Harness {
    /// Harness sending real HTTP with `ureq`.
    pub fn new(config: HarnessConfig) -> Self {
        let transport = UreqTransport::new(config.timeout);
        Self::with_transport(config, transport)
    }

    pub fn with_transport(config: HarnessConfig, transport: impl Transport + 'static) -> Self {
        Self {
            config,
            transport: Arc::new(transport),
        }
    }

    pub fn config(&self) -> &HarnessConfig {
        &self.config
    }

    /// Start a request to `path`, relative to the configured base URL.
    pub fn request(&self, method: HttpMethod, path: &str) -> RequestBuilder {
        RequestBuilder::new(method, join_url(&self.config.base_url, path))
            .headers(self.config.default_headers.iter().cloned())
    }

    pub fn get(&self, path: &str) -> RequestBuilder {
        self.request(HttpMethod::Get, path)
    }

    pub fn post(&self, path: &str) -> RequestBuilder {
        self.request(HttpMethod::Post, path)
    }

    pub fn put(&self, path: &str) -> RequestBuilder {
        self.request(HttpMethod::Put, path)
    }

    pub fn patch(&self, path: &str) -> RequestBuilder {
        self.request(HttpMethod::Patch, path)
    }

    pub fn delete(&self, path: &str) -> RequestBuilder {
        self.request(HttpMethod::Delete, path)
    }

    /// Send `request` and block until the response is fully read.
    pub fn send(&self, request: &HttpRequest) -> Result<HttpResponse, HarnessError> {
        tracing::debug!(
            method = %request.method,
            url = %request.url,
            headers = ?request.headers,
            body = request.body.as_deref().unwrap_or(""),
            "sending request"
        );
        let response = self.transport.execute(request).inspect_err(|err| {
            tracing::warn!(method = %request.method, url = %request.url, %err, "transport failed");
        })?;
        tracing::debug!(
            status = response.status,
            headers = ?response.headers,
            body = %response.body,
            "received response"
        );
        Ok(response)
    }

    /// Send `request` and verify the response against `expectation`.
    pub fn check(
        &self,
        request: &HttpRequest,
        expectation: &Expectation,
    ) -> Result<HttpResponse, HarnessError> {
        let response = self.send(request)?;
        expectation.verify(&response)?;
        Ok(response)
    }
}
