//! The process-wide session value.

use grievancex_types::{IdentityRecord, Role};
use serde::{Deserialize, Serialize};

/// Which identity, if any, is signed in.
///
/// A fresh session is empty and loading: nothing may be decided about it
/// until the persisted record has been restored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// The signed-in identity, without its secret.
    pub active: Option<IdentityRecord>,
    /// Set while a restore or credential check is outstanding.
    pub loading: bool,
}

impl Session {
    /// An empty session awaiting restore.
    pub fn new() -> Self {
        Self {
            active: None,
            loading: true,
        }
    }

    /// A settled session for `active`.
    pub fn settled(active: Option<IdentityRecord>) -> Self {
        Self {
            active,
            loading: false,
        }
    }

    /// Returns true if an identity is signed in.
    pub fn is_signed_in(&self) -> bool {
        self.active.is_some()
    }

    /// Role of the signed-in identity.
    pub fn role(&self) -> Option<Role> {
        self.active.as_ref().map(|record| record.role)
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_is_loading_and_empty() {
        let session = Session::new();
        assert!(session.loading);
        assert!(!session.is_signed_in());
        assert_eq!(session.role(), None);
    }

    #[test]
    fn test_settled_session() {
        let record = IdentityRecord {
            id: "2".to_string(),
            email: "citizen@example.com".to_string(),
            role: Role::Citizen,
            name: "John Doe".to_string(),
        };
        let session = Session::settled(Some(record));

        assert!(!session.loading);
        assert!(session.is_signed_in());
        assert_eq!(session.role(), Some(Role::Citizen));
    }
}
