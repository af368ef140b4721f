//! Session authority configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default key of the persisted session record.
pub const DEFAULT_STORAGE_KEY: &str = "grievancex_user";

/// Default simulated sign-in round trip.
pub const DEFAULT_SIGN_IN_LATENCY_MS: u64 = 1_000;

/// What `restore` does with a persisted record it cannot use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RestorePolicy {
    /// Start signed out, remove the record and log a warning.
    #[default]
    Discard,
    /// Start signed out, keep the record and return
    /// [`AuthError::CorruptRecord`](crate::AuthError::CorruptRecord).
    Reject,
}

/// Configuration for a [`SessionAuthority`](crate::SessionAuthority).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthorityConfig {
    /// Key the session record is persisted under.
    pub storage_key: String,
    /// Simulated credential check latency, in milliseconds.
    pub sign_in_latency_ms: u64,
    /// Handling of malformed persisted records.
    pub restore_policy: RestorePolicy,
}

impl AuthorityConfig {
    /// The sign-in latency as a [`Duration`].
    pub fn sign_in_latency(&self) -> Duration {
        Duration::from_millis(self.sign_in_latency_ms)
    }
}

impl Default for AuthorityConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            sign_in_latency_ms: DEFAULT_SIGN_IN_LATENCY_MS,
            restore_policy: RestorePolicy::Discard,
        }
    }
}
