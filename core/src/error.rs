//! Error types for the eActivities client.
//!
//! # Design
//! A call can fail in exactly one of three ways and callers need to tell them
//! apart: the request never produced a readable response (`Transport`), a
//! success response did not match the expected shape (`Decode`), or the
//! service rejected the request (`Application`). Only `Application` carries a
//! message meant for end users; the other two expose their underlying cause
//! through `source()`.

use std::error::Error as StdError;

use serde::Deserialize;
use thiserror::Error;

/// Errors returned by `Client::fetch` and every endpoint built on it.
#[derive(Debug, Error)]
pub enum ApiError {
    /// No readable response: connection refused, DNS, TLS, timeout, or the
    /// body could not be read.
    #[error("transport failure: {0}")]
    Transport(#[from] TransportError),

    /// The service answered with a success status but the body did not match
    /// the expected shape.
    #[error("decode failure: {0}")]
    Decode(#[from] serde_json::Error),

    /// The service answered with a non-success status.
    #[error(transparent)]
    Application(#[from] ApplicationError),
}

impl ApiError {
    /// The application error, if the service reported one.
    pub fn application(&self) -> Option<&ApplicationError> {
        match self {
            ApiError::Application(err) => Some(err),
            _ => None,
        }
    }

    /// HTTP status of an application error.
    pub fn http_code(&self) -> Option<u16> {
        self.application().map(|err| err.http_code)
    }

    /// True when the service refused the request with 403, which is how it
    /// reports banned addresses and keys without access to a CSP.
    pub fn is_forbidden(&self) -> bool {
        self.http_code() == Some(403)
    }
}

/// A failure reported by the service itself.
///
/// The display string is exactly `message`, which is what the service wants
/// shown to users. It is empty when the failure body was missing or was not
/// of the form `{"message": "..."}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Error, Deserialize)]
#[error("{message}")]
pub struct ApplicationError {
    #[serde(skip)]
    pub http_code: u16,
    #[serde(default)]
    pub message: String,
}

impl ApplicationError {
    /// Builds the error for a non-success response, reading the message from
    /// `body` if it can.
    pub fn from_body(http_code: u16, body: &str) -> Self {
        let parsed: ApplicationError = serde_json::from_str(body).unwrap_or_default();
        Self {
            http_code,
            message: parsed.message,
        }
    }
}

/// The request never produced a readable response.
#[derive(Debug, Error)]
#[error("{source}")]
pub struct TransportError {
    source: Box<dyn StdError + Send + Sync + 'static>,
}

impl TransportError {
    pub fn new(source: impl Into<Box<dyn StdError + Send + Sync + 'static>>) -> Self {
        Self {
            source: source.into(),
        }
    }

    /// The underlying cause, exactly as the transport reported it.
    pub fn cause(&self) -> &(dyn StdError + Send + Sync + 'static) {
        self.source.as_ref()
    }
}

/// A wire literal that neither codec accepts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("invalid date/time {literal:?}: {reason}")]
    Time { literal: String, reason: String },

    #[error("invalid money amount {literal:?}: {reason}")]
    Money { literal: String, reason: String },
}

impl ParseError {
    pub(crate) fn time(literal: &str, reason: impl Into<String>) -> Self {
        ParseError::Time {
            literal: literal.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn money(literal: &str, reason: impl Into<String>) -> Self {
        ParseError::Money {
            literal: literal.to_string(),
            reason: reason.into(),
        }
    }
}

/// Client configuration could not be assembled.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("environment variable {0} is not set")]
    MissingVar(&'static str),

    #[error("API key must not be empty")]
    EmptyApiKey,
}
