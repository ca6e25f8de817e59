//! Mock Okta org using wiremock for integration testing.
//!
//! Mounts `/api/v1` endpoints with configurable response scenarios
//! (success, not-found, rate limiting, pagination).

#![allow(dead_code)]

use serde_json::{json, Value};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use oktide_client::{OktaClient, RetryPolicy};

/// A mock Okta org backed by wiremock.
pub struct MockOktaOrg {
    server: MockServer,
}

impl MockOktaOrg {
    /// Start a new mock org.
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    /// Base URI of the mock org.
    pub fn uri(&self) -> String {
        self.server.uri()
    }

    /// A client pointed at this org, with retries disabled.
    pub fn client(&self) -> OktaClient {
        OktaClient::with_base_url(self.uri(), "test-token-123")
    }

    /// A client with a zero-delay retry policy for retry scenarios.
    pub fn retrying_client(&self, max_retries: u32) -> OktaClient {
        OktaClient::with_base_url(self.uri(), "test-token-123")
            .with_retry_policy(RetryPolicy {
                max_retries,
                base_delay_secs: 0,
                max_delay_secs: 0,
            })
    }

    /// Access the underlying wiremock server (for `expect` assertions).
    pub fn server(&self) -> &MockServer {
        &self.server
    }

    /// A group response body.
    pub fn group_body(id: &str, name: &str, description: Option<&str>) -> Value {
        let mut profile = json!({ "name": name });
        if let Some(description) = description {
            profile["description"] = json!(description);
        }
        json!({ "id": id, "type": "OKTA_GROUP", "profile": profile })
    }

    /// An Okta error body.
    pub fn error_body(code: &str, summary: &str) -> Value {
        json!({
            "errorCode": code,
            "errorSummary": summary,
            "errorCauses": []
        })
    }

    // ── Group mocks ───────────────────────────────────────────────────

    /// POST /api/v1/groups succeeds, assigning the given id.
    pub async fn mock_create_group(&self, id: &str, name: &str) {
        Mock::given(method("POST"))
            .and(path("/api/v1/groups"))
            .and(header("authorization", "SSWS test-token-123"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(Self::group_body(id, name, None)),
            )
            .mount(&self.server)
            .await;
    }

    /// GET /api/v1/groups/{id} succeeds.
    pub async fn mock_get_group(&self, id: &str, name: &str, description: Option<&str>) {
        Mock::given(method("GET"))
            .and(path(format!("/api/v1/groups/{id}")))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(Self::group_body(id, name, description)),
            )
            .mount(&self.server)
            .await;
    }

    /// GET /api/v1/groups/{id} returns 404.
    pub async fn mock_get_group_not_found(&self, id: &str) {
        Mock::given(method("GET"))
            .and(path(format!("/api/v1/groups/{id}")))
            .respond_with(ResponseTemplate::new(404).set_body_json(Self::error_body(
                "E0000007",
                &format!("Not found: Resource not found: {id} (Group)"),
            )))
            .mount(&self.server)
            .await;
    }

    /// PUT /api/v1/groups/{id} succeeds, echoing the new name.
    pub async fn mock_update_group(&self, id: &str, name: &str) {
        Mock::given(method("PUT"))
            .and(path(format!("/api/v1/groups/{id}")))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(Self::group_body(id, name, None)),
            )
            .mount(&self.server)
            .await;
    }

    /// DELETE /api/v1/groups/{id} succeeds with 204.
    pub async fn mock_delete_group(&self, id: &str) {
        Mock::given(method("DELETE"))
            .and(path(format!("/api/v1/groups/{id}")))
            .respond_with(ResponseTemplate::new(204))
            .mount(&self.server)
            .await;
    }

    // ── Membership mocks ──────────────────────────────────────────────

    /// GET /api/v1/groups/{id}/users returns a single page of members.
    pub async fn mock_list_group_users(&self, group_id: &str, user_ids: &[&str]) {
        let body: Vec<Value> = user_ids.iter().map(|id| json!({ "id": id })).collect();
        Mock::given(method("GET"))
            .and(path(format!("/api/v1/groups/{group_id}/users")))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&self.server)
            .await;
    }

    /// GET /api/v1/groups/{id}/users returns two pages linked by a
    /// `rel="next"` header.
    pub async fn mock_list_group_users_paginated(
        &self,
        group_id: &str,
        first_page: &[&str],
        second_page: &[&str],
    ) {
        let next_url = format!(
            "{}/api/v1/groups/{group_id}/users?after=cursor-1&limit=200",
            self.uri()
        );

        let first_body: Vec<Value> = first_page.iter().map(|id| json!({ "id": id })).collect();
        Mock::given(method("GET"))
            .and(path(format!("/api/v1/groups/{group_id}/users")))
            .and(query_param("limit", "200"))
            .and(query_param_absent("after"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(first_body)
                    .insert_header("link", format!("<{next_url}>; rel=\"next\"").as_str()),
            )
            .mount(&self.server)
            .await;

        let second_body: Vec<Value> = second_page.iter().map(|id| json!({ "id": id })).collect();
        Mock::given(method("GET"))
            .and(path(format!("/api/v1/groups/{group_id}/users")))
            .and(query_param("after", "cursor-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(second_body))
            .mount(&self.server)
            .await;
    }

    /// PUT /api/v1/groups/{gid}/users/{uid} succeeds with 204.
    pub async fn mock_add_user(&self, group_id: &str, user_id: &str) {
        Mock::given(method("PUT"))
            .and(path(format!("/api/v1/groups/{group_id}/users/{user_id}")))
            .respond_with(ResponseTemplate::new(204))
            .mount(&self.server)
            .await;
    }

    /// DELETE /api/v1/groups/{gid}/users/{uid} succeeds with 204.
    pub async fn mock_remove_user(&self, group_id: &str, user_id: &str) {
        Mock::given(method("DELETE"))
            .and(path(format!("/api/v1/groups/{group_id}/users/{user_id}")))
            .respond_with(ResponseTemplate::new(204))
            .mount(&self.server)
            .await;
    }

    /// DELETE /api/v1/groups/{gid}/users/{uid} returns 404 (not a member).
    pub async fn mock_remove_user_not_found(&self, group_id: &str, user_id: &str) {
        Mock::given(method("DELETE"))
            .and(path(format!("/api/v1/groups/{group_id}/users/{user_id}")))
            .respond_with(ResponseTemplate::new(404).set_body_json(Self::error_body(
                "E0000007",
                &format!("Not found: Resource not found: {user_id} (User)"),
            )))
            .mount(&self.server)
            .await;
    }

    // ── User schema mocks ─────────────────────────────────────────────

    /// GET /api/v1/meta/schemas/user/default returns a schema with the
    /// given base properties.
    pub async fn mock_user_schema(&self, base_properties: Value) {
        Mock::given(method("GET"))
            .and(path("/api/v1/meta/schemas/user/default"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "https://test.okta.com/meta/schemas/user/default",
                "definitions": { "base": { "id": "#base", "properties": base_properties } }
            })))
            .mount(&self.server)
            .await;
    }

    /// POST /api/v1/meta/schemas/user/default returns the schema after an
    /// update.
    pub async fn mock_update_user_schema(&self, base_properties: Value) {
        Mock::given(method("POST"))
            .and(path("/api/v1/meta/schemas/user/default"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "https://test.okta.com/meta/schemas/user/default",
                "definitions": { "base": { "id": "#base", "properties": base_properties } }
            })))
            .mount(&self.server)
            .await;
    }
}

/// Matcher: the named query parameter is absent from the request.
fn query_param_absent(name: &'static str) -> QueryParamAbsent {
    QueryParamAbsent { name }
}

pub struct QueryParamAbsent {
    name: &'static str,
}

impl wiremock::Match for QueryParamAbsent {
    fn matches(&self, request: &wiremock::Request) -> bool {
        !request
            .url
            .query_pairs()
            .any(|(key, _)| key == self.name)
    }
}
