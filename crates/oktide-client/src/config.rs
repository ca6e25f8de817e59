//! Okta client configuration.
//!
//! Configuration for reaching an Okta org: the org name, the base domain
//! (`okta.com` for production orgs, `oktapreview.com` for preview orgs),
//! and the SSWS API token.

use serde::Deserialize;
use url::Url;

use oktide_core::{OktaError, OktaResult};

/// Default Okta base domain.
pub const DEFAULT_BASE_DOMAIN: &str = "okta.com";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for an [`OktaClient`](crate::client::OktaClient).
#[derive(Clone, Deserialize)]
pub struct OktaConfig {
    /// Okta org name, the `acme` in `acme.okta.com`.
    pub org_name: String,

    /// API token, sent as `Authorization: SSWS <token>`.
    pub api_token: String,

    /// Base domain the org lives under.
    #[serde(default = "default_base_domain")]
    pub base_domain: String,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_base_domain() -> String {
    DEFAULT_BASE_DOMAIN.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl OktaConfig {
    /// Create a configuration with default domain and timeout.
    pub fn new(org_name: impl Into<String>, api_token: impl Into<String>) -> Self {
        Self {
            org_name: org_name.into(),
            api_token: api_token.into(),
            base_domain: default_base_domain(),
            request_timeout_secs: default_timeout_secs(),
        }
    }

    /// Set the base domain (e.g. `oktapreview.com`).
    #[must_use]
    pub fn with_base_domain(mut self, base_domain: impl Into<String>) -> Self {
        self.base_domain = base_domain.into();
        self
    }

    /// Load configuration from `OKTA_ORG_NAME`, `OKTA_API_TOKEN`, and
    /// optionally `OKTA_BASE_URL`.
    pub fn from_env() -> OktaResult<Self> {
        let org_name = std::env::var("OKTA_ORG_NAME")
            .map_err(|_| OktaError::invalid_config("OKTA_ORG_NAME must be set"))?;
        let api_token = std::env::var("OKTA_API_TOKEN")
            .map_err(|_| OktaError::invalid_config("OKTA_API_TOKEN must be set"))?;

        let mut config = Self::new(org_name, api_token);
        if let Ok(base_domain) = std::env::var("OKTA_BASE_URL") {
            if !base_domain.is_empty() {
                config.base_domain = base_domain;
            }
        }

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> OktaResult<()> {
        if self.org_name.is_empty() {
            return Err(OktaError::invalid_config("org_name must not be empty"));
        }
        if self.api_token.is_empty() {
            return Err(OktaError::invalid_config("api_token must not be empty"));
        }
        if self.base_domain.is_empty() {
            return Err(OktaError::invalid_config("base_domain must not be empty"));
        }
        if self.request_timeout_secs == 0 {
            return Err(OktaError::invalid_config(
                "request_timeout_secs must be greater than zero",
            ));
        }

        let org_url = self.org_url();
        Url::parse(&org_url).map_err(|e| {
            OktaError::invalid_config(format!("org URL '{org_url}' is not a valid URL: {e}"))
        })?;

        Ok(())
    }

    /// The org base URL, e.g. `https://acme.okta.com`.
    #[must_use]
    pub fn org_url(&self) -> String {
        format!("https://{}.{}", self.org_name, self.base_domain)
    }
}

// Manual Debug keeps the API token out of logs.
impl std::fmt::Debug for OktaConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OktaConfig")
            .field("org_name", &self.org_name)
            .field("api_token", &"***")
            .field("base_domain", &self.base_domain)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .finish()
    }
}
