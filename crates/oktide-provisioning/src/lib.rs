//! # oktide-provisioning
//!
//! Desired-state lifecycle and reconciliation for Okta resources.
//!
//! Every pass works the same way: decode a typed spec, fetch the actual
//! remote state, derive the minimal mutations that converge actual to
//! desired, issue them, then re-read so the returned state reflects
//! remote truth. Nothing is persisted between passes; the remote-assigned
//! identity, held by the caller, is the only durable handle.
//!
//! - [`group`] - Group lifecycle (create/read/update/delete/exists/import)
//! - [`membership`] - Membership diffing and convergence
//! - [`schema`] - User base-schema attribute lifecycle
//! - [`sweep`] - Prefix-scoped bulk group cleanup with aggregated errors
//!
//! Passes never retry; transient errors propagate to the caller, which
//! owns retry policy for whole operations. Transport-level retry (rate
//! limits, 5xx) lives in `oktide-client`.
//!
//! ## Example
//!
//! ```ignore
//! use oktide_provisioning::{GroupLifecycle, GroupSpec};
//! use oktide_core::UserId;
//!
//! let spec = GroupSpec::new("Engineering")
//!     .with_description("All engineers")
//!     .manage_members(vec![UserId::new("00u1"), UserId::new("00u2")]);
//!
//! let state = GroupLifecycle::create(&client, &spec).await?;
//! // state.id is the durable handle for subsequent passes
//! let state = GroupLifecycle::update(&client, &state.id, &spec).await?;
//! ```

pub mod group;
pub mod membership;
pub mod schema;
pub mod sweep;

pub use group::{GroupLifecycle, GroupSpec, GroupState};
pub use membership::{ConvergeSummary, MembershipDiff, MembershipReconciler};
pub use schema::{BaseSchemaSpec, BaseSchemaState, UserBaseSchemaLifecycle};
pub use sweep::{sweep_groups, SweepReport};
