//! Directory capability traits.
//!
//! Capability-based trait definitions over the remote directory. Lifecycle
//! and reconciliation logic is written against these seams, never against a
//! concrete HTTP client, so every operation receives its directory handle
//! explicitly and tests can substitute in-memory fakes.

use async_trait::async_trait;

use crate::error::OktaResult;
use crate::ids::{GroupId, PropertyIndex, UserId};
use crate::model::{Group, GroupProfile, SchemaProperty, UserSchema};

/// Base trait for all directory implementations.
#[async_trait]
pub trait DirectoryService: Send + Sync {
    /// Display name for this directory instance, used in logs.
    fn display_name(&self) -> &str;

    /// Probe the directory with the configured credentials.
    ///
    /// Returns `Ok(())` if the credentials are accepted, or an error
    /// describing what went wrong. Implementations should use a cheap
    /// read-only request.
    async fn verify_credentials(&self) -> OktaResult<()>;
}

/// Capability for group CRUD operations.
#[async_trait]
pub trait GroupStore: DirectoryService {
    /// Create a group from its profile.
    ///
    /// # Returns
    /// The created group, including its remote-assigned [`GroupId`].
    async fn create_group(&self, profile: &GroupProfile) -> OktaResult<Group>;

    /// Fetch a group by id.
    ///
    /// A not-found response is an answer, not an error: it yields
    /// `Ok(None)`. Any other non-success response is an error.
    async fn get_group(&self, id: &GroupId) -> OktaResult<Option<Group>>;

    /// Replace a group's profile.
    async fn update_group(&self, id: &GroupId, profile: &GroupProfile) -> OktaResult<Group>;

    /// Delete a group.
    async fn delete_group(&self, id: &GroupId) -> OktaResult<()>;

    /// List groups, optionally filtered by a name query prefix.
    async fn list_groups(&self, query: Option<&str>) -> OktaResult<Vec<Group>>;
}

/// Capability for group membership operations.
///
/// Unlike [`GroupStore::get_group`], the mutation methods here surface
/// not-found as an [`OktaError::NotFound`](crate::OktaError::NotFound)
/// so the caller decides whether it is benign: membership reconciliation
/// swallows it on remove and treats it as fatal on add.
#[async_trait]
pub trait GroupMembership: DirectoryService {
    /// List the ids of all members of a group.
    async fn list_member_ids(&self, group: &GroupId) -> OktaResult<Vec<UserId>>;

    /// Add a user to a group.
    async fn add_member(&self, group: &GroupId, user: &UserId) -> OktaResult<()>;

    /// Remove a user from a group.
    async fn remove_member(&self, group: &GroupId, user: &UserId) -> OktaResult<()>;
}

/// Capability for user schema operations.
#[async_trait]
pub trait UserSchemaStore: DirectoryService {
    /// Fetch the default user schema.
    async fn get_user_schema(&self) -> OktaResult<UserSchema>;

    /// Apply a partial update to one base property of the default user
    /// schema.
    ///
    /// # Returns
    /// The full schema after the update.
    async fn update_base_property(
        &self,
        index: &PropertyIndex,
        property: &SchemaProperty,
    ) -> OktaResult<UserSchema>;
}

/// Marker trait for directories supporting every capability.
pub trait FullDirectory: GroupStore + GroupMembership + UserSchemaStore {}

// Blanket implementation for any directory with all capabilities
impl<T> FullDirectory for T where T: GroupStore + GroupMembership + UserSchemaStore {}
