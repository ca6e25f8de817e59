//! In-memory directory fake for lifecycle testing.
//!
//! Implements every capability trait over plain maps, counts calls so
//! tests can assert which remote operations a pass issued, and supports
//! injected failures for error-path scenarios.

#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Mutex;

use oktide_core::model::{Group, GroupProfile, SchemaProperty, UserSchema};
use oktide_core::traits::{DirectoryService, GroupMembership, GroupStore, UserSchemaStore};
use oktide_core::{GroupId, OktaError, OktaResult, PropertyIndex, UserId};

/// Per-operation call counters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallCounters {
    pub group_creates: usize,
    pub group_gets: usize,
    pub group_updates: usize,
    pub group_deletes: usize,
    pub group_lists: usize,
    pub member_lists: usize,
    pub member_adds: usize,
    pub member_removes: usize,
    pub schema_gets: usize,
    pub schema_updates: usize,
}

impl CallCounters {
    /// Total membership reads and writes.
    pub fn membership_total(&self) -> usize {
        self.member_lists + self.member_adds + self.member_removes
    }
}

#[derive(Default)]
struct Inner {
    next_group: u32,
    groups: BTreeMap<GroupId, GroupProfile>,
    members: BTreeMap<GroupId, BTreeSet<UserId>>,
    schema: UserSchema,
    counters: CallCounters,
    fail_delete_for: BTreeSet<GroupId>,
    fail_group_list: bool,
}

/// An in-memory Okta org.
pub struct FakeDirectory {
    inner: Mutex<Inner>,
}

impl FakeDirectory {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner::default()),
        }
    }

    /// Seed a group directly, bypassing counters. Returns its id.
    pub fn seed_group(&self, name: &str) -> GroupId {
        let mut inner = self.inner.lock().unwrap();
        inner.next_group += 1;
        let id = GroupId::new(format!("00gfake{:04}", inner.next_group));
        inner.groups.insert(id.clone(), GroupProfile::new(name));
        id
    }

    /// Seed group membership directly, bypassing counters.
    pub fn seed_members(&self, group: &GroupId, users: &[&str]) {
        let mut inner = self.inner.lock().unwrap();
        inner
            .members
            .insert(group.clone(), users.iter().map(|u| UserId::new(*u)).collect());
    }

    /// Seed the user schema directly.
    pub fn seed_schema(&self, schema: UserSchema) {
        self.inner.lock().unwrap().schema = schema;
    }

    /// Make `delete_group` fail for the given group.
    pub fn fail_delete_for(&self, group: &GroupId) {
        self.inner.lock().unwrap().fail_delete_for.insert(group.clone());
    }

    /// Make `list_groups` fail.
    pub fn fail_group_list(&self) {
        self.inner.lock().unwrap().fail_group_list = true;
    }

    /// Snapshot of the call counters.
    pub fn counters(&self) -> CallCounters {
        self.inner.lock().unwrap().counters.clone()
    }

    /// Current membership of a group.
    pub fn members_of(&self, group: &GroupId) -> BTreeSet<UserId> {
        self.inner
            .lock()
            .unwrap()
            .members
            .get(group)
            .cloned()
            .unwrap_or_default()
    }

    /// Whether the group currently exists.
    pub fn has_group(&self, group: &GroupId) -> bool {
        self.inner.lock().unwrap().groups.contains_key(group)
    }

    fn group_of(profile: &GroupProfile, id: &GroupId) -> Group {
        Group {
            id: id.clone(),
            group_type: Some("OKTA_GROUP".to_string()),
            profile: profile.clone(),
        }
    }
}

#[async_trait]
impl DirectoryService for FakeDirectory {
    fn display_name(&self) -> &str {
        "fake-org"
    }

    async fn verify_credentials(&self) -> OktaResult<()> {
        Ok(())
    }
}

#[async_trait]
impl GroupStore for FakeDirectory {
    async fn create_group(&self, profile: &GroupProfile) -> OktaResult<Group> {
        let mut inner = self.inner.lock().unwrap();
        inner.counters.group_creates += 1;
        inner.next_group += 1;
        let id = GroupId::new(format!("00gfake{:04}", inner.next_group));
        inner.groups.insert(id.clone(), profile.clone());
        Ok(Self::group_of(profile, &id))
    }

    async fn get_group(&self, id: &GroupId) -> OktaResult<Option<Group>> {
        let mut inner = self.inner.lock().unwrap();
        inner.counters.group_gets += 1;
        Ok(inner
            .groups
            .get(id)
            .map(|profile| Self::group_of(profile, id)))
    }

    async fn update_group(&self, id: &GroupId, profile: &GroupProfile) -> OktaResult<Group> {
        let mut inner = self.inner.lock().unwrap();
        inner.counters.group_updates += 1;
        if !inner.groups.contains_key(id) {
            return Err(OktaError::not_found(format!("group {id}")));
        }
        inner.groups.insert(id.clone(), profile.clone());
        Ok(Self::group_of(profile, id))
    }

    async fn delete_group(&self, id: &GroupId) -> OktaResult<()> {
        let mut inner = self.inner.lock().unwrap();
        inner.counters.group_deletes += 1;
        if inner.fail_delete_for.contains(id) {
            return Err(OktaError::Api {
                status: 403,
                detail: format!("group {id} may not be deleted"),
            });
        }
        if inner.groups.remove(id).is_none() {
            return Err(OktaError::not_found(format!("group {id}")));
        }
        inner.members.remove(id);
        Ok(())
    }

    async fn list_groups(&self, query: Option<&str>) -> OktaResult<Vec<Group>> {
        let mut inner = self.inner.lock().unwrap();
        inner.counters.group_lists += 1;
        if inner.fail_group_list {
            return Err(OktaError::Api {
                status: 500,
                detail: "listing unavailable".into(),
            });
        }
        Ok(inner
            .groups
            .iter()
            .filter(|(_, profile)| query.is_none_or(|q| profile.name.starts_with(q)))
            .map(|(id, profile)| Self::group_of(profile, id))
            .collect())
    }
}

#[async_trait]
impl GroupMembership for FakeDirectory {
    async fn list_member_ids(&self, group: &GroupId) -> OktaResult<Vec<UserId>> {
        let mut inner = self.inner.lock().unwrap();
        inner.counters.member_lists += 1;
        Ok(inner
            .members
            .get(group)
            .map(|members| members.iter().cloned().collect())
            .unwrap_or_default())
    }

    async fn add_member(&self, group: &GroupId, user: &UserId) -> OktaResult<()> {
        let mut inner = self.inner.lock().unwrap();
        inner.counters.member_adds += 1;
        inner
            .members
            .entry(group.clone())
            .or_default()
            .insert(user.clone());
        Ok(())
    }

    async fn remove_member(&self, group: &GroupId, user: &UserId) -> OktaResult<()> {
        let mut inner = self.inner.lock().unwrap();
        inner.counters.member_removes += 1;
        let removed = inner
            .members
            .get_mut(group)
            .is_some_and(|members| members.remove(user));
        if removed {
            Ok(())
        } else {
            Err(OktaError::not_found(format!(
                "user {user} is not a member of group {group}"
            )))
        }
    }
}

#[async_trait]
impl UserSchemaStore for FakeDirectory {
    async fn get_user_schema(&self) -> OktaResult<UserSchema> {
        let mut inner = self.inner.lock().unwrap();
        inner.counters.schema_gets += 1;
        Ok(inner.schema.clone())
    }

    async fn update_base_property(
        &self,
        index: &PropertyIndex,
        property: &SchemaProperty,
    ) -> OktaResult<UserSchema> {
        let mut inner = self.inner.lock().unwrap();
        inner.counters.schema_updates += 1;
        inner
            .schema
            .definitions
            .base
            .properties
            .insert(index.as_str().to_string(), property.clone());
        Ok(inner.schema.clone())
    }
}
