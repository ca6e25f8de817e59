//! Okta management API client (reqwest-based).
//!
//! Wraps `reqwest::Client` with SSWS token authentication, status-code to
//! error mapping, `Link` header cursor pagination, and a transport-level
//! retry policy, then implements the directory capability traits on top.

use chrono::{DateTime, Utc};
use reqwest::header::{self, HeaderMap};
use reqwest::{Client, Method, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

use async_trait::async_trait;
use oktide_core::model::{Group, GroupProfile, GroupUser, SchemaProperty, UserSchema};
use oktide_core::traits::{DirectoryService, GroupMembership, GroupStore, UserSchemaStore};
use oktide_core::{GroupId, OktaError, OktaResult, PropertyIndex, UserId};

use crate::config::OktaConfig;
use crate::retry::RetryPolicy;

/// Page size requested from paginated list endpoints.
const PAGE_LIMIT: u32 = 200;

/// Safety cap on paginated fetches to bound memory on very large orgs.
const MAX_PAGINATED_RESULTS: usize = 10_000;

/// Path of the default user schema, also used as the credential probe.
const USER_SCHEMA_PATH: &str = "/api/v1/meta/schemas/user/default";

/// Error body returned by the Okta API.
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    #[serde(rename = "errorSummary")]
    error_summary: String,
}

/// Request payload wrapping a group profile, as the groups API expects.
#[derive(Serialize)]
struct GroupPayload<'a> {
    profile: &'a GroupProfile,
}

/// Partial user schema update targeting a single base property.
#[derive(Serialize)]
struct BasePropertyUpdate<'a> {
    definitions: BasePropertyDefinitions<'a>,
}

#[derive(Serialize)]
struct BasePropertyDefinitions<'a> {
    base: BasePropertySection<'a>,
}

#[derive(Serialize)]
struct BasePropertySection<'a> {
    properties: BTreeMap<&'a str, &'a SchemaProperty>,
}

/// Result of probing the org with the configured credentials.
#[derive(Debug, Clone, Serialize)]
pub struct HealthCheck {
    /// Whether the org is reachable and the token is accepted.
    pub healthy: bool,
    /// Timestamp of the check.
    pub checked_at: DateTime<Utc>,
    /// Error message if unhealthy.
    pub error: Option<String>,
}

/// Okta management API client.
#[derive(Debug, Clone)]
pub struct OktaClient {
    /// Org base URL without trailing slash, e.g. `https://acme.okta.com`.
    base_url: String,
    /// SSWS API token.
    api_token: String,
    /// Display name used in logs (the org name).
    display_name: String,
    /// Underlying HTTP client.
    http_client: Client,
    /// Transport-level retry policy.
    retry: RetryPolicy,
}

impl OktaClient {
    /// Create a client from a validated configuration.
    pub fn new(config: &OktaConfig) -> OktaResult<Self> {
        config.validate()?;

        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .user_agent(concat!("oktide/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| OktaError::invalid_config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            base_url: config.org_url(),
            api_token: config.api_token.clone(),
            display_name: config.org_name.clone(),
            http_client,
            retry: RetryPolicy::default(),
        })
    }

    /// Create a client against an explicit base URL, with no retries.
    ///
    /// Intended for tests and non-standard deployments where the org URL
    /// is not derived from an org name.
    #[must_use]
    pub fn with_base_url(base_url: impl Into<String>, api_token: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            display_name: base_url.clone(),
            base_url,
            api_token: api_token.into(),
            http_client: Client::new(),
            retry: RetryPolicy::none(),
        }
    }

    /// Replace the retry policy.
    #[must_use]
    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// The org base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Probe the org, reporting reachability instead of failing.
    pub async fn health_check(&self) -> HealthCheck {
        let checked_at = Utc::now();
        match self.get_json::<UserSchema>("okta_credential_probe", USER_SCHEMA_PATH).await {
            Ok(_) => HealthCheck {
                healthy: true,
                checked_at,
                error: None,
            },
            Err(e) => HealthCheck {
                healthy: false,
                checked_at,
                error: Some(e.to_string()),
            },
        }
    }

    // ── Group operations ──────────────────────────────────────────────

    /// Create a group (POST /api/v1/groups).
    pub async fn add_group(&self, profile: &GroupProfile) -> OktaResult<Group> {
        self.send_json(
            "okta_create_group",
            Method::POST,
            "/api/v1/groups",
            &GroupPayload { profile },
        )
        .await
    }

    /// Fetch a group by id (GET /api/v1/groups/{id}).
    ///
    /// A missing group surfaces as [`OktaError::NotFound`]; the
    /// [`GroupStore`] implementation translates that into `Ok(None)`.
    pub async fn fetch_group(&self, id: &GroupId) -> OktaResult<Group> {
        self.get_json("okta_get_group", &format!("/api/v1/groups/{id}"))
            .await
    }

    /// Replace a group's profile (PUT /api/v1/groups/{id}).
    pub async fn replace_group(&self, id: &GroupId, profile: &GroupProfile) -> OktaResult<Group> {
        self.send_json(
            "okta_update_group",
            Method::PUT,
            &format!("/api/v1/groups/{id}"),
            &GroupPayload { profile },
        )
        .await
    }

    /// Delete a group (DELETE /api/v1/groups/{id}).
    pub async fn remove_group(&self, id: &GroupId) -> OktaResult<()> {
        self.send_no_content(
            "okta_delete_group",
            Method::DELETE,
            &format!("/api/v1/groups/{id}"),
        )
        .await
    }

    /// List groups, optionally filtered by a name query (GET /api/v1/groups).
    pub async fn search_groups(&self, query: Option<&str>) -> OktaResult<Vec<Group>> {
        let mut url = self.api_url("/api/v1/groups")?;
        url.query_pairs_mut()
            .append_pair("limit", &PAGE_LIMIT.to_string());
        if let Some(q) = query {
            url.query_pairs_mut().append_pair("q", q);
        }
        self.paginated_get("okta_list_groups", url).await
    }

    // ── Membership operations ─────────────────────────────────────────

    /// List all members of a group, following pagination
    /// (GET /api/v1/groups/{id}/users).
    pub async fn list_group_users(&self, id: &GroupId) -> OktaResult<Vec<GroupUser>> {
        let mut url = self.api_url(&format!("/api/v1/groups/{id}/users"))?;
        url.query_pairs_mut()
            .append_pair("limit", &PAGE_LIMIT.to_string());
        self.paginated_get("okta_list_group_users", url).await
    }

    /// Add a user to a group (PUT /api/v1/groups/{gid}/users/{uid}).
    pub async fn add_user_to_group(&self, group: &GroupId, user: &UserId) -> OktaResult<()> {
        self.send_no_content(
            "okta_add_group_user",
            Method::PUT,
            &format!("/api/v1/groups/{group}/users/{user}"),
        )
        .await
    }

    /// Remove a user from a group (DELETE /api/v1/groups/{gid}/users/{uid}).
    ///
    /// Removing a user that is not a member yields
    /// [`OktaError::NotFound`], which membership reconciliation treats as
    /// already-converged.
    pub async fn remove_user_from_group(&self, group: &GroupId, user: &UserId) -> OktaResult<()> {
        self.send_no_content(
            "okta_remove_group_user",
            Method::DELETE,
            &format!("/api/v1/groups/{group}/users/{user}"),
        )
        .await
    }

    // ── User schema operations ────────────────────────────────────────

    /// Fetch the default user schema
    /// (GET /api/v1/meta/schemas/user/default).
    pub async fn fetch_user_schema(&self) -> OktaResult<UserSchema> {
        self.get_json("okta_get_user_schema", USER_SCHEMA_PATH).await
    }

    /// Apply a partial update to one base property of the default user
    /// schema (POST /api/v1/meta/schemas/user/default).
    pub async fn post_base_property(
        &self,
        index: &PropertyIndex,
        property: &SchemaProperty,
    ) -> OktaResult<UserSchema> {
        let mut properties = BTreeMap::new();
        properties.insert(index.as_str(), property);
        let update = BasePropertyUpdate {
            definitions: BasePropertyDefinitions {
                base: BasePropertySection { properties },
            },
        };
        self.send_json(
            "okta_update_base_property",
            Method::POST,
            USER_SCHEMA_PATH,
            &update,
        )
        .await
    }

    // ── Internal plumbing ─────────────────────────────────────────────

    fn api_url(&self, path: &str) -> OktaResult<Url> {
        Url::parse(&format!("{}{}", self.base_url, path))
            .map_err(|e| OktaError::invalid_config(format!("invalid request URL: {e}")))
    }

    /// Issue one request and map the response status, without retrying.
    async fn send_once<B: Serialize + ?Sized>(
        &self,
        method: Method,
        url: &str,
        body: Option<&B>,
    ) -> OktaResult<Response> {
        debug!("Okta {} {}", method, url);
        let mut builder = self
            .http_client
            .request(method, url)
            .header(header::AUTHORIZATION, format!("SSWS {}", self.api_token))
            .header(header::ACCEPT, "application/json");
        if let Some(body) = body {
            builder = builder.json(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| OktaError::network_with_source(format!("request to {url} failed"), e))?;

        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            Err(Self::error_from_response(response).await)
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, operation: &str, path: &str) -> OktaResult<T> {
        let url = self.api_url(path)?;
        let response = self
            .retry
            .execute(operation, || {
                self.send_once(Method::GET, url.as_str(), None::<&()>)
            })
            .await?;
        Self::decode(response).await
    }

    async fn send_json<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        operation: &str,
        method: Method,
        path: &str,
        body: &B,
    ) -> OktaResult<T> {
        let url = self.api_url(path)?;
        let response = self
            .retry
            .execute(operation, || {
                self.send_once(method.clone(), url.as_str(), Some(body))
            })
            .await?;
        Self::decode(response).await
    }

    async fn send_no_content(
        &self,
        operation: &str,
        method: Method,
        path: &str,
    ) -> OktaResult<()> {
        let url = self.api_url(path)?;
        self.retry
            .execute(operation, || {
                self.send_once(method.clone(), url.as_str(), None::<&()>)
            })
            .await?;
        Ok(())
    }

    /// Fetch every page of a list endpoint by following `Link` headers
    /// with `rel="next"`, up to a safety cap.
    async fn paginated_get<T: DeserializeOwned>(
        &self,
        operation: &str,
        first_url: Url,
    ) -> OktaResult<Vec<T>> {
        let mut url = first_url;
        let mut items: Vec<T> = Vec::new();

        loop {
            let response = self
                .retry
                .execute(operation, || {
                    self.send_once(Method::GET, url.as_str(), None::<&()>)
                })
                .await?;

            let next = next_link(response.headers());
            let page: Vec<T> = Self::decode(response).await?;
            items.extend(page);

            if items.len() >= MAX_PAGINATED_RESULTS {
                warn!(
                    operation,
                    fetched = items.len(),
                    "Reached pagination safety cap, stopping fetch"
                );
                break;
            }

            match next {
                Some(next_url) => {
                    url = Url::parse(&next_url).map_err(|e| {
                        OktaError::serialization(format!("invalid Link header URL: {e}"))
                    })?;
                }
                None => break,
            }
        }

        Ok(items)
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> OktaResult<T> {
        let body = response
            .text()
            .await
            .map_err(|e| OktaError::network_with_source("failed to read response body", e))?;
        serde_json::from_str(&body)
            .map_err(|e| OktaError::serialization(format!("failed to decode response: {e}")))
    }

    async fn error_from_response(response: Response) -> OktaError {
        let status = response.status();

        let retry_after = response
            .headers()
            .get(header::RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<u64>().ok());

        let body = response.text().await.unwrap_or_default();
        let summary = match serde_json::from_str::<ApiErrorBody>(&body) {
            Ok(parsed) => parsed.error_summary,
            Err(_) if body.is_empty() => format!("HTTP {status}"),
            Err(_) => body,
        };

        match status {
            StatusCode::NOT_FOUND => OktaError::NotFound { resource: summary },
            StatusCode::UNAUTHORIZED => OktaError::Unauthorized { message: summary },
            StatusCode::TOO_MANY_REQUESTS => {
                warn!(retry_after_secs = ?retry_after, "Okta API rate limited the request");
                OktaError::RateLimited {
                    retry_after_secs: retry_after,
                }
            }
            _ => OktaError::Api {
                status: status.as_u16(),
                detail: summary,
            },
        }
    }
}

/// Extract the `rel="next"` target from a response's `Link` headers.
fn next_link(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(header::LINK)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(','))
        .find_map(|link| {
            let mut parts = link.trim().split(';');
            let target = parts.next()?.trim();
            if parts.any(|p| p.trim() == r#"rel="next""#) {
                Some(
                    target
                        .trim_start_matches('<')
                        .trim_end_matches('>')
                        .to_string(),
                )
            } else {
                None
            }
        })
}

// ── Capability trait implementations ──────────────────────────────────

#[async_trait]
impl DirectoryService for OktaClient {
    fn display_name(&self) -> &str {
        &self.display_name
    }

    async fn verify_credentials(&self) -> OktaResult<()> {
        // Cheap read-only probe, same request the original provider uses
        // to vet credentials at configure time.
        self.fetch_user_schema().await.map(|_| ())
    }
}

#[async_trait]
impl GroupStore for OktaClient {
    async fn create_group(&self, profile: &GroupProfile) -> OktaResult<Group> {
        self.add_group(profile).await
    }

    async fn get_group(&self, id: &GroupId) -> OktaResult<Option<Group>> {
        match self.fetch_group(id).await {
            Ok(group) => Ok(Some(group)),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn update_group(&self, id: &GroupId, profile: &GroupProfile) -> OktaResult<Group> {
        self.replace_group(id, profile).await
    }

    async fn delete_group(&self, id: &GroupId) -> OktaResult<()> {
        self.remove_group(id).await
    }

    async fn list_groups(&self, query: Option<&str>) -> OktaResult<Vec<Group>> {
        self.search_groups(query).await
    }
}

#[async_trait]
impl GroupMembership for OktaClient {
    async fn list_member_ids(&self, group: &GroupId) -> OktaResult<Vec<UserId>> {
        let users = self.list_group_users(group).await?;
        Ok(users.into_iter().map(|u| u.id).collect())
    }

    async fn add_member(&self, group: &GroupId, user: &UserId) -> OktaResult<()> {
        self.add_user_to_group(group, user).await
    }

    async fn remove_member(&self, group: &GroupId, user: &UserId) -> OktaResult<()> {
        self.remove_user_from_group(group, user).await
    }
}

#[async_trait]
impl UserSchemaStore for OktaClient {
    async fn get_user_schema(&self) -> OktaResult<UserSchema> {
        self.fetch_user_schema().await
    }

    async fn update_base_property(
        &self,
        index: &PropertyIndex,
        property: &SchemaProperty,
    ) -> OktaResult<UserSchema> {
        self.post_base_property(index, property).await
    }
}
