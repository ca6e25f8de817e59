//! Wire model types for Okta resources.
//!
//! Shapes follow the Okta management API (`/api/v1`): groups carry their
//! editable attributes inside a `profile` object, and the default user
//! schema nests base properties under `definitions.base.properties`.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::ids::{GroupId, UserId};

/// Editable attributes of a group.
///
/// This is the desired-profile payload for create and update; the server
/// returns it back embedded in [`Group`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupProfile {
    /// Group name.
    pub name: String,
    /// Group description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl GroupProfile {
    /// Create a profile with the given name and no description.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
        }
    }

    /// Set the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// A group as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    /// Remote-assigned identifier, immutable after create.
    pub id: GroupId,
    /// Group kind, e.g. `OKTA_GROUP` (absent for some API versions).
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub group_type: Option<String>,
    /// Editable attributes.
    pub profile: GroupProfile,
}

/// A group member entry, as returned by `GET /groups/{id}/users`.
///
/// The full user payload carries far more, but membership reconciliation
/// only ever needs the id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupUser {
    pub id: UserId,
}

/// Access granted on a schema property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PermissionAction {
    ReadOnly,
    ReadWrite,
    Hide,
}

impl PermissionAction {
    /// The wire representation, as accepted in configuration.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            PermissionAction::ReadOnly => "READ_ONLY",
            PermissionAction::ReadWrite => "READ_WRITE",
            PermissionAction::Hide => "HIDE",
        }
    }
}

/// A principal/action pair on a schema property.
///
/// Okta models property access as a list of these; for base properties the
/// principal is always `SELF`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaPermission {
    pub principal: String,
    pub action: PermissionAction,
}

impl SchemaPermission {
    /// Permission entry for the `SELF` principal.
    pub fn for_self(action: PermissionAction) -> Self {
        Self {
            principal: "SELF".to_string(),
            action,
        }
    }
}

/// Data type of a schema property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyType {
    String,
    Boolean,
    Number,
    Integer,
    Array,
}

/// Which system masters a profile attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyMaster {
    #[serde(rename = "type")]
    pub master_type: String,
}

/// A single property of the user schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaProperty {
    /// Display title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Data type.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub property_type: Option<PropertyType>,
    /// Whether a value is mandatory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
    /// Mastering source.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub master: Option<PropertyMaster>,
    /// Minimum string length.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<u32>,
    /// Maximum string length.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u32>,
    /// Access granted per principal.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub permissions: Vec<SchemaPermission>,
}

/// One schema section (`base` or `custom`), holding its properties.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaSection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub properties: BTreeMap<String, SchemaProperty>,
}

/// The `definitions` object of the user schema.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaDefinitions {
    #[serde(default)]
    pub base: SchemaSection,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom: Option<SchemaSection>,
}

/// The default user schema, as returned by
/// `GET /api/v1/meta/schemas/user/default`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSchema {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub definitions: SchemaDefinitions,
}

impl UserSchema {
    /// Look up a base property by index.
    #[must_use]
    pub fn base_property(&self, index: &str) -> Option<&SchemaProperty> {
        self.definitions.base.properties.get(index)
    }

    /// Whether the base schema contains a property with the given index.
    #[must_use]
    pub fn has_base_property(&self, index: &str) -> bool {
        self.definitions.base.properties.contains_key(index)
    }
}
