//! The single place where requests meet the network.
//!
//! # Design
//! `Transport` is deliberately narrow: take a prepared request, return a
//! response or fail. `Client` owns everything else (URLs, credentials, status
//! handling, decoding), so swapping the transport changes only how bytes move.
//! Production code uses [`UreqTransport`]; tests use [`FakeTransport`], which
//! never opens a socket.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

use crate::error::TransportError;
use crate::http::{HttpRequest, HttpResponse};

/// Executes one HTTP round trip.
///
/// Implementations must return non-success statuses as `Ok` responses; `Err`
/// is reserved for requests that produced no readable response at all.
pub trait Transport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError>;
}

impl<T: Transport + ?Sized> Transport for Arc<T> {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        (**self).execute(request)
    }
}

impl<T: Transport + ?Sized> Transport for &T {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        (**self).execute(request)
    }
}

/// Blocking transport backed by a `ureq` agent.
///
/// The agent is configured so 4xx/5xx responses come back as data rather
/// than errors, letting `Client` interpret them. Timeouts are whatever the
/// agent was built with; pass a custom agent to impose a deadline.
#[derive(Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl fmt::Debug for UreqTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UreqTransport").finish_non_exhaustive()
    }
}

impl UreqTransport {
    pub fn new() -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent }
    }

    /// Uses a caller-built agent. It must be configured with
    /// `http_status_as_error(false)` or error responses surface as transport
    /// failures.
    pub fn with_agent(agent: ureq::Agent) -> Self {
        Self { agent }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for UreqTransport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        let mut call = self.agent.get(&request.url);
        for (name, value) in &request.headers {
            call = call.header(name.as_str(), value.as_str());
        }
        let mut response = call.call().map_err(TransportError::new)?;
        let status = response.status().as_u16();
        let body = response
            .body_mut()
            .read_to_string()
            .map_err(TransportError::new)?;
        Ok(HttpResponse { status, body })
    }
}

/// Deterministic transport that replays canned responses.
///
/// Responses are keyed by the request URL with `root` stripped, so tests can
/// register `"/CSP/170"` rather than a full URL. Every request is recorded,
/// including ones that fail. Unknown paths fail as transport errors.
#[derive(Debug, Default)]
pub struct FakeTransport {
    root: String,
    responses: HashMap<String, HttpResponse>,
    failure: Option<String>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl FakeTransport {
    pub fn new(root: &str) -> Self {
        Self {
            root: root.to_string(),
            ..Self::default()
        }
    }

    pub fn with_response(mut self, path: &str, response: HttpResponse) -> Self {
        self.responses.insert(path.to_string(), response);
        self
    }

    /// Makes every call fail with a transport error carrying `message`.
    pub fn failing(mut self, message: &str) -> Self {
        self.failure = Some(message.to_string());
        self
    }

    /// Every request received so far, oldest first.
    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Transport for FakeTransport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(request.clone());

        if let Some(message) = &self.failure {
            return Err(TransportError::new(message.clone()));
        }
        let key = request.url.strip_prefix(&self.root).unwrap_or(&request.url);
        self.responses
            .get(key)
            .cloned()
            .ok_or_else(|| TransportError::new(format!("unexpected request: {key}")))
    }
}
