//! Directory identities and their secret-free projection.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::Role;

/// An account in the identity directory.
///
/// Directory files spell the secret as `password`. The secret is never
/// printed by `Debug`.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Unique identifier.
    pub id: String,
    /// Contact address, used as the sign-in key. Unique in a directory.
    pub email: String,
    /// Opaque comparison string.
    #[serde(rename = "password")]
    secret: String,
    /// Role granted to this account.
    pub role: Role,
    /// Name shown in the client.
    pub name: String,
}

impl Identity {
    /// Creates a new identity.
    pub fn new(
        id: impl Into<String>,
        email: impl Into<String>,
        secret: impl Into<String>,
        role: Role,
    ) -> Self {
        Self {
            id: id.into(),
            email: email.into(),
            secret: secret.into(),
            role,
            name: String::new(),
        }
    }

    /// Sets the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Exact comparison of both the contact address and the secret.
    pub fn matches(&self, email: &str, secret: &str) -> bool {
        self.email == email && self.secret == secret
    }

    /// The identity without its secret.
    pub fn record(&self) -> IdentityRecord {
        IdentityRecord {
            id: self.id.clone(),
            email: self.email.clone(),
            role: self.role,
            name: self.name.clone(),
        }
    }
}

impl fmt::Debug for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Identity")
            .field("id", &self.id)
            .field("email", &self.email)
            .field("secret", &"[REDACTED]")
            .field("role", &self.role)
            .field("name", &self.name)
            .finish()
    }
}

/// An identity minus its secret.
///
/// This is what a session holds, what callers receive after signing in and
/// what is written to persisted storage.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IdentityRecord {
    /// Identifier of the directory entry.
    pub id: String,
    /// Contact address.
    pub email: String,
    /// Granted role.
    pub role: Role,
    /// Display name.
    pub name: String,
}

impl IdentityRecord {
    /// Checks that this record is the projection of `identity`.
    pub fn describes(&self, identity: &Identity) -> bool {
        self.id == identity.id
            && self.email == identity.email
            && self.role == identity.role
            && self.name == identity.name
    }
}

impl From<&Identity> for IdentityRecord {
    fn from(identity: &Identity) -> Self {
        identity.record()
    }
}
