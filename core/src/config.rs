//! Client configuration: where the service lives and which key to present.

use std::env;
use std::fmt;

use crate::error::ConfigError;

/// Production API root.
pub const DEFAULT_ROOT: &str = "https://eactivities.union.ic.ac.uk/API";

/// Environment variable holding the API key.
pub const API_KEY_VAR: &str = "EACTIVITIES_API_KEY";

/// Environment variable overriding [`DEFAULT_ROOT`].
pub const API_ROOT_VAR: &str = "EACTIVITIES_API_ROOT";

/// The static credential sent as `X-API-Key` on every request.
///
/// `Debug` is redacted so the key never ends up in logs or panic messages.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Result<Self, ConfigError> {
        let key = key.into();
        if key.trim().is_empty() {
            return Err(ConfigError::EmptyApiKey);
        }
        Ok(Self(key))
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(<redacted>)")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub api_key: ApiKey,
}

impl ClientConfig {
    /// Configuration for the production service.
    pub fn new(api_key: ApiKey) -> Self {
        Self {
            base_url: DEFAULT_ROOT.to_string(),
            api_key,
        }
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.to_string();
        self
    }

    /// Reads `EACTIVITIES_API_KEY` and, if set, `EACTIVITIES_API_ROOT`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Same as [`ClientConfig::from_env`] with a custom variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let key = lookup(API_KEY_VAR).ok_or(ConfigError::MissingVar(API_KEY_VAR))?;
        let config = Self::new(ApiKey::new(key)?);
        Ok(match lookup(API_ROOT_VAR) {
            Some(root) if !root.is_empty() => config.with_base_url(&root),
            _ => config,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| vars.get(name).cloned()
    }

    #[test]
    fn defaults_to_production_root() {
        let config = ClientConfig::from_lookup(lookup(&[(API_KEY_VAR, "abc")])).unwrap();
        assert_eq!(config.base_url, DEFAULT_ROOT);
        assert_eq!(config.api_key.expose(), "abc");
    }

    #[test]
    fn root_can_be_overridden() {
        let config = ClientConfig::from_lookup(lookup(&[
            (API_KEY_VAR, "abc"),
            (API_ROOT_VAR, "http://localhost:3000"),
        ]))
        .unwrap();
        assert_eq!(config.base_url, "http://localhost:3000");
    }

    #[test]
    fn missing_key_is_an_error() {
        let err = ClientConfig::from_lookup(lookup(&[])).unwrap_err();
        assert_eq!(err, ConfigError::MissingVar(API_KEY_VAR));
    }

    #[test]
    fn blank_key_is_rejected() {
        assert_eq!(ApiKey::new("  ").unwrap_err(), ConfigError::EmptyApiKey);
    }

    #[test]
    fn debug_hides_the_key() {
        let config = ClientConfig::new(ApiKey::new("supersecret").unwrap());
        let shown = format!("{config:?}");
        assert!(!shown.contains("supersecret"), "{shown}");
    }
}
