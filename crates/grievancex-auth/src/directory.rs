//! The static identity directory.

use grievancex_types::{Identity, IdentityRecord, Role};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

use crate::error::{AuthError, Result};

/// Fixed set of known identities.
///
/// Built once at startup and never mutated: no identity is created, changed
/// or removed while a session authority is running.
#[derive(Debug, Clone)]
pub struct Directory {
    identities: Vec<Identity>,
}

impl Directory {
    /// Builds a directory, rejecting duplicate ids or contact addresses.
    pub fn new(identities: Vec<Identity>) -> Result<Self> {
        let mut ids = HashSet::new();
        let mut emails = HashSet::new();

        for identity in &identities {
            if !ids.insert(identity.id.as_str()) {
                return Err(AuthError::DuplicateIdentity(format!("id '{}'", identity.id)));
            }
            if !emails.insert(identity.email.as_str()) {
                return Err(AuthError::DuplicateIdentity(format!(
                    "email '{}'",
                    identity.email
                )));
            }
        }

        Ok(Self { identities })
    }

    /// The accounts shipped with the client.
    pub fn builtin() -> Self {
        Self {
            identities: vec![
                Identity::new("1", "admin@grievancex.com", "admin123", Role::Administrator)
                    .with_name("Admin User"),
                Identity::new("2", "citizen@example.com", "citizen123", Role::Citizen)
                    .with_name("John Doe"),
                Identity::new("3", "user@demo.com", "demo123", Role::Citizen)
                    .with_name("Jane Smith"),
            ],
        }
    }

    /// Parses a JSON array of identities.
    pub fn from_json(json: &str) -> Result<Self> {
        let identities: Vec<Identity> = serde_json::from_str(json)?;
        Self::new(identities)
    }

    /// Loads a JSON array of identities from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let directory = Self::from_json(&contents)?;
        tracing::info!(path = %path.display(), identities = directory.len(), "Loaded identity directory");
        Ok(directory)
    }

    /// Finds the identity matching both the contact address and the secret.
    pub fn find(&self, email: &str, secret: &str) -> Option<&Identity> {
        self.identities.iter().find(|i| i.matches(email, secret))
    }

    /// Gets an identity by id.
    pub fn get(&self, id: &str) -> Option<&Identity> {
        self.identities.iter().find(|i| i.id == id)
    }

    /// Checks that `record` is the projection of a directory identity.
    pub fn recognizes(&self, record: &IdentityRecord) -> bool {
        self.get(&record.id).is_some_and(|i| record.describes(i))
    }

    /// Iterates over all identities in directory order.
    pub fn iter(&self) -> impl Iterator<Item = &Identity> {
        self.identities.iter()
    }

    /// Number of identities.
    pub fn len(&self) -> usize {
        self.identities.len()
    }

    /// Returns true if the directory has no identities.
    pub fn is_empty(&self) -> bool {
        self.identities.is_empty()
    }
}

impl Default for Directory {
    fn default() -> Self {
        Self::builtin()
    }
}
