//! Authenticated request pipeline for the eActivities API.
//!
//! # Design
//! `Client` holds only a base URL, an API key and a transport, and carries no
//! mutable state between calls, so one instance can be shared freely across
//! threads. Each call is split into `build_request`, which produces an
//! `HttpRequest`, and `parse_response`, which consumes an `HttpResponse`.
//! `fetch` joins the two through the transport. Keeping the halves public
//! lets callers drive the round trip themselves when they need to.

use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::config::{ApiKey, ClientConfig};
use crate::error::{ApiError, ApplicationError};
use crate::http::{HttpRequest, HttpResponse, API_KEY_HEADER};
use crate::transport::{Transport, UreqTransport};

/// Blocking client for the eActivities API.
#[derive(Debug, Clone)]
pub struct Client<T = UreqTransport> {
    base_url: String,
    api_key: ApiKey,
    transport: T,
}

impl Client<UreqTransport> {
    /// Client for the production service over HTTPS.
    pub fn new(api_key: ApiKey) -> Self {
        Self::from_config(&ClientConfig::new(api_key))
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::with_transport(&config.base_url, config.api_key.clone(), UreqTransport::new())
    }
}

impl<T> Client<T> {
    pub fn with_transport(base_url: &str, api_key: ApiKey, transport: T) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            transport,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// A GET for `base_url + path`, carrying the API key. `path` is used
    /// verbatim, query string included.
    pub fn build_request(&self, path: &str) -> HttpRequest {
        HttpRequest {
            url: format!("{}{path}", self.base_url),
            headers: vec![(API_KEY_HEADER.to_string(), self.api_key.expose().to_string())],
        }
    }

    /// Decodes a success body into `D`, or turns any other status into an
    /// [`ApplicationError`].
    ///
    /// Failure bodies are read best-effort: if one is not
    /// `{"message": "..."}` the error carries an empty message.
    pub fn parse_response<D: DeserializeOwned>(
        &self,
        response: HttpResponse,
    ) -> Result<D, ApiError> {
        if !response.is_success() {
            let err = ApplicationError::from_body(response.status, &response.body);
            warn!(status = err.http_code, message = %err.message, "service rejected request");
            return Err(err.into());
        }
        serde_json::from_str(&response.body).map_err(|e| {
            warn!(
                status = response.status,
                error = %e,
                "response body did not match expected shape"
            );
            ApiError::Decode(e)
        })
    }
}

impl<T: Transport> Client<T> {
    /// GETs `path` and decodes the response into `D`.
    ///
    /// Exactly one request is sent. Nothing is retried.
    pub fn fetch<D: DeserializeOwned>(&self, path: &str) -> Result<D, ApiError> {
        let request = self.build_request(path);
        debug!(url = %request.url, "dispatching request");
        let response = self.transport.execute(&request).map_err(|e| {
            warn!(url = %request.url, error = %e, "transport failure");
            ApiError::Transport(e)
        })?;
        debug!(url = %request.url, status = response.status, "response received");
        self.parse_response(response)
    }
}
