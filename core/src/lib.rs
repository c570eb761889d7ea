//! Blocking client for the eActivities clubs and finance API.
//!
//! # Overview
//! `Client` sends authenticated GETs and decodes the JSON replies into typed
//! records: CSPs, committees, members, online sales and transaction lines.
//! The service's own wire formats get dedicated codecs: offset-less
//! date/times read in the London zone ([`Time`]) and exact decimal amounts
//! ([`Money`]). [`date_to_year`] produces the academic-year labels the
//! report endpoints are keyed by.
//!
//! # Design
//! - `Client` is immutable; it holds a base URL, an API key and a transport.
//! - Network I/O lives behind the [`Transport`] trait. [`UreqTransport`] is
//!   the production implementation and [`FakeTransport`] replays canned
//!   responses for tests.
//! - Every call ends in exactly one of: a decoded value, an
//!   [`ApplicationError`] from the service, a decode failure, or a transport
//!   failure (see [`ApiError`]).

pub mod client;
pub mod config;
pub mod csp;
pub mod error;
pub mod http;
mod lenient;
pub mod money;
pub mod reports;
pub mod time;
pub mod transport;
pub mod year;
pub mod zone;

pub use client::Client;
pub use config::{ApiKey, ClientConfig, DEFAULT_ROOT};
pub use csp::CspInfo;
pub use error::{ApiError, ApplicationError, ConfigError, ParseError, TransportError};
pub use http::{HttpRequest, HttpResponse, API_KEY_HEADER};
pub use money::{parse_money, Money};
pub use reports::{
    Account, Activity, CommitteeMember, Customer, Funding, Member, OnlineSale, TransactionLine, Vat,
};
pub use time::{parse_time, parse_time_in, Time};
pub use transport::{FakeTransport, Transport, UreqTransport};
pub use year::{current_year, date_to_year, date_to_year_in, YearLabel};
pub use zone::SERVICE_ZONE;
