//! # oktide-client
//!
//! Okta management API client for the oktide workspace.
//!
//! Implements the directory capability traits from `oktide-core` over the
//! Okta `/api/v1` REST surface:
//!
//! - [`config`] - Org configuration (org name, base domain, SSWS token)
//!   with validation and environment loading
//! - [`retry`] - Transport-level retry with exponential backoff and
//!   `Retry-After` awareness
//! - [`client`] - The [`OktaClient`]: group CRUD, group membership with
//!   `Link` header pagination, and user schema operations
//!
//! ## Example
//!
//! ```ignore
//! use oktide_client::{OktaClient, OktaConfig};
//!
//! let config = OktaConfig::from_env()?;
//! let client = OktaClient::new(&config)?;
//! client.verify_credentials().await?;
//! ```

pub mod client;
pub mod config;
pub mod retry;

pub use client::{HealthCheck, OktaClient};
pub use config::OktaConfig;
pub use retry::RetryPolicy;
