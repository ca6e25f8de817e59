//! Strongly typed resource identifiers.
//!
//! Okta assigns every group and user an opaque string id on creation.
//! These newtypes prevent accidental misuse of different id kinds at
//! compile time, and make the "no update or delete before an identity is
//! known" rule structural: the only ways to obtain a `GroupId` are a
//! create/read response or an explicit import handle supplied by the
//! caller.
//!
//! # Example
//!
//! ```
//! use oktide_core::{GroupId, UserId};
//!
//! let group = GroupId::new("00g1emaKYZTWRYYRRTSK");
//! let user = UserId::new("00u1f96ECLNVOKVMUSEA");
//!
//! fn requires_group(id: &GroupId) -> &str {
//!     id.as_str()
//! }
//!
//! let _ = requires_group(&group);
//! // requires_group(&user); // does not compile
//! ```

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Macro to define an opaque string identifier type.
macro_rules! define_remote_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wraps an identifier value received from the remote side
            /// (or supplied by the caller when importing).
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            /// Returns the identifier as a string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consumes the identifier, returning the inner string.
            #[must_use]
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_remote_id!(
    /// Identifier of an Okta group, assigned by the remote side on create.
    GroupId
);

define_remote_id!(
    /// Identifier of an Okta user.
    ///
    /// Membership reconciliation treats these as opaque tokens; format
    /// validation happens upstream at the configuration boundary.
    UserId
);

define_remote_id!(
    /// Index (property name) of a user schema attribute, e.g. `firstName`.
    ///
    /// Unlike group and user ids this value is chosen by the caller, but it
    /// serves the same role: the durable handle for read/update operations.
    PropertyIndex
);
