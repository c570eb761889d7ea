//! HTTP request and response values exchanged with a [`Transport`].
//!
//! # Design
//! Requests and responses are plain data. `Client` builds an `HttpRequest`,
//! a transport turns it into an `HttpResponse`, and `Client` parses the
//! result. Only the transport ever touches the network, so everything on
//! either side of it stays deterministic and testable.
//!
//! The service is read-only, so every request is a GET and carries no body.
//!
//! [`Transport`]: crate::transport::Transport

/// Header carrying the API key on every request.
pub const API_KEY_HEADER: &str = "X-API-Key";

/// A GET request described as plain data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub url: String,
    pub headers: Vec<(String, String)>,
}

impl HttpRequest {
    /// Returns the first value of the named header, compared case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// An HTTP response described as plain data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_lookup_ignores_case() {
        let req = HttpRequest {
            url: "http://fake/root/CSP".to_string(),
            headers: vec![(API_KEY_HEADER.to_string(), "secret".to_string())],
        };
        assert_eq!(req.header("x-api-key"), Some("secret"));
        assert_eq!(req.header("Authorization"), None);
    }

    #[test]
    fn success_covers_whole_2xx_range() {
        assert!(HttpResponse::new(200, "").is_success());
        assert!(HttpResponse::new(204, "").is_success());
        assert!(!HttpResponse::new(301, "").is_success());
        assert!(!HttpResponse::new(403, "").is_success());
    }
}
