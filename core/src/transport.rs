//! Executes requests over the network.
//!
//! # Design
//! `Transport` is the only seam that performs I/O. `UreqTransport` is the
//! real implementation; unit tests substitute canned transports. Non-2xx
//! statuses come back as ordinary responses (`http_status_as_error(false)`)
//! so the matcher, not the transport, decides what a 404 means.

use std::time::Duration;

use crate::error::HarnessError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};

/// Sends one request and blocks until the full response has been read.
pub trait Transport: Send + Sync {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, HarnessError>;
}

impl<T: Transport + ?Sized> Transport for std::sync::Arc<T> {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, HarnessError> {
        (**self).execute(request)
    }
}

/// Blocking transport backed by a shared `ureq::Agent`.
#[derive(Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    pub fn new(timeout: Option<Duration>) -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(timeout)
            .build()
            .new_agent();
        Self { agent }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new(None)
    }
}

impl Transport for UreqTransport {
    fn execute(&self, req: &HttpRequest) -> Result<HttpResponse, HarnessError> {
        let result = match req.method {
            HttpMethod::Get => send_without_body(self.agent.get(&req.url), req),
            HttpMethod::Delete => send_without_body(self.agent.delete(&req.url), req),
            HttpMethod::Post => send_with_body(self.agent.post(&req.url), req),
            HttpMethod::Put => send_with_body(self.agent.put(&req.url), req),
            HttpMethod::Patch => send_with_body(self.agent.patch(&req.url), req),
        };
        let mut response = result.map_err(transport_error)?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();
        let body = if status == 204 {
            String::new()
        } else {
            response
                .body_mut()
                .read_to_string()
                .map_err(transport_error)?
        };

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

type UreqResult = Result<ureq::http::Response<ureq::Body>, ureq::Error>;

fn send_without_body(
    mut builder: ureq::RequestBuilder<ureq::typestate::WithoutBody>,
    req: &HttpRequest,
) -> UreqResult {
    for (name, value) in &req.headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    match &req.body {
        Some(body) => builder.force_send_body().send(body.as_bytes()),
        None => builder.call(),
    }
}

fn send_with_body(
    mut builder: ureq::RequestBuilder<ureq::typestate::WithBody>,
    req: &HttpRequest,
) -> UreqResult {
    for (name, value) in &req.headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    match &req.body {
        Some(body) => builder.send(body.as_bytes()),
        None => builder.send_empty(),
    }
}

fn transport_error(err: ureq::Error) -> HarnessError {
    HarnessError::Transport(err.to_string())
}
