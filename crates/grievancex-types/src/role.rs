//! Account roles.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::Destination;

/// Role carried by every identity.
///
/// Serialized as `"admin"` / `"citizen"`, which is also the persisted
/// session layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    /// Municipal staff triaging and resolving grievances.
    #[serde(rename = "admin")]
    Administrator,
    /// Resident filing and tracking grievances.
    #[serde(rename = "citizen")]
    Citizen,
}

impl Role {
    /// All roles, in directory order.
    pub const ALL: [Role; 2] = [Role::Administrator, Role::Citizen];

    /// Where a signed-in user of this role is sent when the gate turns them
    /// away from a page reserved for another role.
    pub fn landing(&self) -> Destination {
        match self {
            Role::Administrator => Destination::Admin,
            Role::Citizen => Destination::Dashboard,
        }
    }

    /// Where a signed-in user of this role is sent from public-only pages
    /// such as the sign-in page.
    pub fn home(&self) -> Destination {
        match self {
            Role::Administrator => Destination::Admin,
            Role::Citizen => Destination::Report,
        }
    }

    /// Short lowercase name, matching the serialized form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Administrator => "admin",
            Role::Citizen => "citizen",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string names no known role.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown role: {0}")]
pub struct ParseRoleError(pub String);

impl FromStr for Role {
    type Err = ParseRoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "admin" | "administrator" => Ok(Role::Administrator),
            "citizen" => Ok(Role::Citizen),
            _ => Err(ParseRoleError(s.to_string())),
        }
    }
}
