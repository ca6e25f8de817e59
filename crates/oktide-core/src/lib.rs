//! # oktide-core
//!
//! Foundation types for declarative Okta resource provisioning.
//!
//! This crate defines the shared vocabulary the rest of the workspace is
//! written in:
//!
//! - [`ids`] - Opaque, strongly typed remote identifiers
//!   (`GroupId`, `UserId`, `PropertyIndex`)
//! - [`error`] - The [`OktaError`] taxonomy and the [`AggregateError`]
//!   collector for independent bulk operations
//! - [`model`] - Wire model types for groups and the user schema
//! - [`traits`] - Directory capability traits (`GroupStore`,
//!   `GroupMembership`, `UserSchemaStore`) that form the seam between
//!   lifecycle logic and any concrete client
//!
//! ## Example
//!
//! ```ignore
//! use oktide_core::prelude::*;
//!
//! async fn rename<D: GroupStore>(directory: &D, id: &GroupId) -> OktaResult<Group> {
//!     let profile = GroupProfile::new("Platform Engineering");
//!     directory.update_group(id, &profile).await
//! }
//! ```

pub mod error;
pub mod ids;
pub mod model;
pub mod traits;

pub use error::{AggregateError, OktaError, OktaResult};
pub use ids::{GroupId, PropertyIndex, UserId};

/// Prelude module for convenient imports.
///
/// ```
/// use oktide_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::{AggregateError, OktaError, OktaResult};
    pub use crate::ids::{GroupId, PropertyIndex, UserId};
    pub use crate::model::{
        Group, GroupProfile, GroupUser, PermissionAction, PropertyMaster, PropertyType,
        SchemaPermission, SchemaProperty, UserSchema,
    };
    pub use crate::traits::{
        DirectoryService, FullDirectory, GroupMembership, GroupStore, UserSchemaStore,
    };
}

// Re-export async_trait for trait implementors
pub use async_trait::async_trait;
