//! User base-schema attribute lifecycle.
//!
//! Manages one base profile property of the default user schema
//! (`firstName`, `login`, ...). Base properties always exist and cannot be
//! removed from the schema, so the lifecycle has no create, and delete
//! releases the handle without touching the remote side.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use oktide_core::model::{
    PermissionAction, PropertyMaster, PropertyType, SchemaPermission, SchemaProperty, UserSchema,
};
use oktide_core::traits::UserSchemaStore;
use oktide_core::{OktaError, OktaResult, PropertyIndex};

/// Desired settings for one base schema property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseSchemaSpec {
    /// Property index, e.g. `firstName`. Doubles as the resource identity.
    pub index: PropertyIndex,
    /// Display title.
    #[serde(default)]
    pub title: Option<String>,
    /// Data type.
    #[serde(rename = "type", default)]
    pub property_type: Option<PropertyType>,
    /// Whether a value is mandatory.
    #[serde(default)]
    pub required: Option<bool>,
    /// Access granted to the user on their own profile.
    #[serde(default)]
    pub permissions: Option<PermissionAction>,
    /// Mastering source, e.g. `PROFILE_MASTER`.
    #[serde(default)]
    pub master: Option<String>,
    /// Minimum string length.
    #[serde(default)]
    pub min_length: Option<u32>,
    /// Maximum string length.
    #[serde(default)]
    pub max_length: Option<u32>,
}

impl BaseSchemaSpec {
    /// Create a spec for the given property index.
    pub fn new(index: impl Into<PropertyIndex>) -> Self {
        Self {
            index: index.into(),
            title: None,
            property_type: None,
            required: None,
            permissions: None,
            master: None,
            min_length: None,
            max_length: None,
        }
    }

    /// The partial property payload this spec describes.
    #[must_use]
    pub fn property(&self) -> SchemaProperty {
        SchemaProperty {
            title: self.title.clone(),
            property_type: self.property_type,
            required: self.required,
            master: self.master.clone().map(|master_type| PropertyMaster { master_type }),
            min_length: self.min_length,
            max_length: self.max_length,
            permissions: self
                .permissions
                .map(|action| vec![SchemaPermission::for_self(action)])
                .unwrap_or_default(),
        }
    }
}

/// Observed state of a base schema property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BaseSchemaState {
    pub index: PropertyIndex,
    pub title: Option<String>,
    pub property_type: Option<PropertyType>,
    pub required: bool,
    /// The `SELF` principal's access, when the schema reports one.
    pub permissions: Option<PermissionAction>,
    pub min_length: Option<u32>,
    pub max_length: Option<u32>,
}

impl BaseSchemaState {
    fn from_schema(schema: &UserSchema, index: &PropertyIndex) -> Option<Self> {
        let property = schema.base_property(index.as_str())?;
        Some(Self {
            index: index.clone(),
            title: property.title.clone(),
            property_type: property.property_type,
            required: property.required.unwrap_or(false),
            permissions: property
                .permissions
                .iter()
                .find(|p| p.principal == "SELF")
                .map(|p| p.action),
            min_length: property.min_length,
            max_length: property.max_length,
        })
    }
}

/// Stateless lifecycle orchestrator for base schema properties.
pub struct UserBaseSchemaLifecycle;

impl UserBaseSchemaLifecycle {
    /// Apply the desired settings to the property and read it back.
    pub async fn update<D: UserSchemaStore + ?Sized>(
        directory: &D,
        spec: &BaseSchemaSpec,
    ) -> OktaResult<BaseSchemaState> {
        let schema = directory
            .update_base_property(&spec.index, &spec.property())
            .await?;

        info!(index = %spec.index, "Updated base schema property");

        BaseSchemaState::from_schema(&schema, &spec.index).ok_or_else(|| {
            OktaError::not_found(format!(
                "base schema property {} missing after update",
                spec.index
            ))
        })
    }

    /// Read a property's observed state; `Ok(None)` when the index does
    /// not exist in the base schema.
    pub async fn read<D: UserSchemaStore + ?Sized>(
        directory: &D,
        index: &PropertyIndex,
    ) -> OktaResult<Option<BaseSchemaState>> {
        let schema = directory.get_user_schema().await?;
        Ok(BaseSchemaState::from_schema(&schema, index))
    }

    /// Whether the base schema contains the property.
    pub async fn exists<D: UserSchemaStore + ?Sized>(
        directory: &D,
        index: &PropertyIndex,
    ) -> OktaResult<bool> {
        let schema = directory.get_user_schema().await?;
        Ok(schema.has_base_property(index.as_str()))
    }

    /// Release the managed property without remote mutation.
    ///
    /// Base properties cannot be removed from the default schema; deleting
    /// the managed attribute only forgets the handle.
    pub async fn delete<D: UserSchemaStore + ?Sized>(
        _directory: &D,
        index: &PropertyIndex,
    ) -> OktaResult<()> {
        debug!(index = %index, "Base schema properties are never deleted remotely");
        Ok(())
    }
}
