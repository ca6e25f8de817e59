//! Group lifecycle: create, read, update, delete, exists, import.
//!
//! Each operation takes the directory handle explicitly, decodes nothing
//! itself (the spec struct arrives already typed), and finishes mutating
//! passes with a read-back so the returned state reflects remote truth
//! rather than what was sent.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::info;

use oktide_core::model::GroupProfile;
use oktide_core::traits::{GroupMembership, GroupStore};
use oktide_core::{GroupId, OktaError, OktaResult, UserId};

use crate::membership::MembershipReconciler;

/// Desired state of a group, decoded from configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupSpec {
    /// Group name.
    pub name: String,
    /// Group description.
    #[serde(default)]
    pub description: Option<String>,
    /// Whether this configuration owns the group's membership.
    ///
    /// When false, membership is treated as managed elsewhere: no
    /// membership reads or writes happen, regardless of `members`.
    #[serde(default)]
    pub manage_members: bool,
    /// Desired member set; only honored when `manage_members` is true.
    #[serde(default)]
    pub members: BTreeSet<UserId>,
}

impl GroupSpec {
    /// Create a spec with the given name, membership unmanaged.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            manage_members: false,
            members: BTreeSet::new(),
        }
    }

    /// Set the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Turn on membership management with the given desired members.
    #[must_use]
    pub fn manage_members(mut self, members: impl IntoIterator<Item = UserId>) -> Self {
        self.manage_members = true;
        self.members = members.into_iter().collect();
        self
    }

    /// The profile payload this spec describes.
    #[must_use]
    pub fn profile(&self) -> GroupProfile {
        GroupProfile {
            name: self.name.clone(),
            description: self.description.clone(),
        }
    }
}

/// Observed state of a group after a pass, read back from the remote side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupState {
    /// Remote-assigned identity, the durable handle for later passes.
    pub id: GroupId,
    /// Observed name.
    pub name: String,
    /// Observed description.
    pub description: Option<String>,
    /// Observed membership. `None` when membership is not managed, so
    /// callers can distinguish "unmanaged" from "empty".
    pub members: Option<BTreeSet<UserId>>,
}

/// Stateless group lifecycle orchestrator.
pub struct GroupLifecycle;

impl GroupLifecycle {
    /// Create a group from its spec.
    ///
    /// Creates the remote group, converges membership if managed, then
    /// reads the result back. The returned state carries the
    /// remote-assigned [`GroupId`]; the caller is responsible for keeping
    /// it for subsequent passes.
    pub async fn create<D>(directory: &D, spec: &GroupSpec) -> OktaResult<GroupState>
    where
        D: GroupStore + GroupMembership,
    {
        let group = directory.create_group(&spec.profile()).await?;
        let id = group.id.clone();

        info!(group_id = %id, name = %spec.name, "Created group");

        if spec.manage_members {
            MembershipReconciler::converge(directory, &id, &spec.members).await?;
        }

        Self::read_back(directory, &id, spec.manage_members).await
    }

    /// Read a group's observed state.
    ///
    /// Not-found yields `Ok(None)`; absence is an answer here, not an
    /// error. Membership is read only when `manage_members` is true.
    pub async fn read<D>(
        directory: &D,
        id: &GroupId,
        manage_members: bool,
    ) -> OktaResult<Option<GroupState>>
    where
        D: GroupStore + GroupMembership,
    {
        let Some(group) = directory.get_group(id).await? else {
            return Ok(None);
        };

        let members = if manage_members {
            Some(
                directory
                    .list_member_ids(id)
                    .await?
                    .into_iter()
                    .collect::<BTreeSet<_>>(),
            )
        } else {
            None
        };

        Ok(Some(GroupState {
            id: group.id,
            name: group.profile.name,
            description: group.profile.description,
            members,
        }))
    }

    /// Update a group to match its spec.
    ///
    /// Replaces the profile, converges membership if managed, then reads
    /// the result back.
    pub async fn update<D>(directory: &D, id: &GroupId, spec: &GroupSpec) -> OktaResult<GroupState>
    where
        D: GroupStore + GroupMembership,
    {
        directory.update_group(id, &spec.profile()).await?;

        info!(group_id = %id, name = %spec.name, "Updated group");

        if spec.manage_members {
            MembershipReconciler::converge(directory, id, &spec.members).await?;
        }

        Self::read_back(directory, id, spec.manage_members).await
    }

    /// Delete a group. Errors propagate unchanged.
    pub async fn delete<D: GroupStore + ?Sized>(directory: &D, id: &GroupId) -> OktaResult<()> {
        directory.delete_group(id).await?;
        info!(group_id = %id, "Deleted group");
        Ok(())
    }

    /// Whether a group exists remotely.
    ///
    /// A not-found read yields `Ok(false)` with no error.
    pub async fn exists<D: GroupStore + ?Sized>(directory: &D, id: &GroupId) -> OktaResult<bool> {
        Ok(directory.get_group(id).await?.is_some())
    }

    /// Adopt an existing remote group by identity.
    ///
    /// Unlike [`read`](Self::read), importing a group that does not exist
    /// is an error: the caller asserted the identity is valid.
    pub async fn import<D>(
        directory: &D,
        id: &GroupId,
        manage_members: bool,
    ) -> OktaResult<GroupState>
    where
        D: GroupStore + GroupMembership,
    {
        Self::read(directory, id, manage_members)
            .await?
            .ok_or_else(|| OktaError::not_found(format!("group {id} cannot be imported")))
    }

    /// Re-read after a mutating pass; the group must still exist.
    async fn read_back<D>(
        directory: &D,
        id: &GroupId,
        manage_members: bool,
    ) -> OktaResult<GroupState>
    where
        D: GroupStore + GroupMembership,
    {
        Self::read(directory, id, manage_members)
            .await?
            .ok_or_else(|| OktaError::not_found(format!("group {id} disappeared after write")))
    }
}
