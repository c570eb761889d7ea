//! Clubs, Societies and Projects (CSPs) visible to the API key.

use serde::{Deserialize, Serialize};

use crate::client::Client;
use crate::error::ApiError;
use crate::lenient::null_as_default;
use crate::transport::Transport;

/// Basic details of a single CSP.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CspInfo {
    /// Centre code used in every per-CSP path, e.g. `"170"`.
    #[serde(default, deserialize_with = "null_as_default")]
    pub code: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub web_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub acronym: String,
}

impl<T: Transport> Client<T> {
    /// CSPs this API key has permission to view.
    pub fn list_csps(&self) -> Result<Vec<CspInfo>, ApiError> {
        self.fetch("/CSP")
    }

    pub fn csp_details(&self, centre: &str) -> Result<CspInfo, ApiError> {
        self.fetch(&format!("/CSP/{centre}"))
    }
}
