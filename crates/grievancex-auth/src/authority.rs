//! The session authority.
//!
//! Owns the one [`Session`] of a running client, checks credentials against
//! the [`Directory`] and keeps the persisted record in step with the session.

use grievancex_types::{Destination, IdentityRecord, Role};
use tokio::sync::watch;

use crate::{
    config::{AuthorityConfig, RestorePolicy},
    credentials::Credentials,
    directory::Directory,
    error::{AuthError, Result},
    gate::{self, Admission},
    session::Session,
    storage::SessionStorage,
};

/// Result of a credential check.
///
/// Does not say whether the address or the secret was wrong.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignInOutcome {
    /// The pair matched; the identity is now signed in.
    Authenticated(IdentityRecord),
    /// No directory identity matched the pair.
    Rejected,
}

impl SignInOutcome {
    /// Returns true if the credentials were accepted.
    pub fn is_success(&self) -> bool {
        matches!(self, SignInOutcome::Authenticated(_))
    }

    /// The signed-in identity, if accepted.
    pub fn identity(&self) -> Option<&IdentityRecord> {
        match self {
            SignInOutcome::Authenticated(record) => Some(record),
            SignInOutcome::Rejected => None,
        }
    }
}

/// Holds and mutates the client's session.
///
/// Constructed once at startup by the application scope and shared by
/// reference (or `Arc`). Collaborators read it through
/// [`session`](Self::session) or observe it through
/// [`subscribe`](Self::subscribe).
///
/// # Example
///
/// ```
/// use grievancex_auth::{AuthorityConfig, Directory, MemoryStorage, SessionAuthority};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> grievancex_auth::Result<()> {
/// let config = AuthorityConfig { sign_in_latency_ms: 0, ..Default::default() };
/// let authority = SessionAuthority::new(Directory::builtin(), MemoryStorage::new(), config);
/// authority.restore()?;
///
/// let outcome = authority.authenticate("citizen@example.com", "citizen123").await?;
/// assert!(outcome.is_success());
/// assert_eq!(authority.current_identity().unwrap().name, "John Doe");
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct SessionAuthority<S> {
    directory: Directory,
    storage: S,
    config: AuthorityConfig,
    state: watch::Sender<Session>,
}

impl<S: SessionStorage> SessionAuthority<S> {
    /// Creates an authority with an empty, loading session.
    pub fn new(directory: Directory, storage: S, config: AuthorityConfig) -> Self {
        let (state, _) = watch::channel(Session::new());
        Self {
            directory,
            storage,
            config,
            state,
        }
    }

    /// Restores the session from persisted storage.
    ///
    /// A record is used only if it parses and still describes a directory
    /// identity. Whatever happens, the session stops loading. Unusable
    /// records are handled per [`RestorePolicy`].
    pub fn restore(&self) -> Result<Option<IdentityRecord>> {
        match self.read_persisted() {
            Ok(record) => {
                match &record {
                    Some(r) => tracing::info!(email = %r.email, role = %r.role, "Restored session"),
                    None => tracing::debug!("No persisted session"),
                }
                self.state.send_replace(Session::settled(record.clone()));
                Ok(record)
            }
            Err(e) => {
                self.state.send_replace(Session::settled(None));
                match self.config.restore_policy {
                    RestorePolicy::Discard => {
                        tracing::warn!(
                            key = %self.config.storage_key,
                            error = %e,
                            "Discarding unusable session record"
                        );
                        if let Err(rm) = self.storage.remove(&self.config.storage_key) {
                            tracing::warn!(error = %rm, "Failed to remove session record");
                        }
                        Ok(None)
                    }
                    RestorePolicy::Reject => Err(e),
                }
            }
        }
    }

    fn read_persisted(&self) -> Result<Option<IdentityRecord>> {
        let raw = self
            .storage
            .get(&self.config.storage_key)
            .map_err(|e| AuthError::CorruptRecord(format!("unreadable: {e}")))?;

        let Some(raw) = raw else {
            return Ok(None);
        };

        let record: IdentityRecord = serde_json::from_str(&raw)
            .map_err(|e| AuthError::CorruptRecord(format!("malformed: {e}")))?;

        if !self.directory.recognizes(&record) {
            return Err(AuthError::CorruptRecord(format!(
                "identity '{}' is not in the directory",
                record.id
            )));
        }

        Ok(Some(record))
    }

    /// Checks a contact address and secret against the directory.
    ///
    /// Suspends for the configured sign-in latency before comparing. On a
    /// match the record is persisted first, then the session is updated; if
    /// persisting fails the session is left as it was. A rejection never
    /// touches the session or storage.
    pub async fn authenticate(&self, email: &str, secret: &str) -> Result<SignInOutcome> {
        self.state.send_modify(|s| s.loading = true);
        let _loading = LoadingGuard(&self.state);

        let latency = self.config.sign_in_latency();
        if !latency.is_zero() {
            tokio::time::sleep(latency).await;
        }

        let Some(identity) = self.directory.find(email, secret) else {
            tracing::info!(email = %email, "Sign-in rejected");
            self.state.send_modify(|s| s.loading = false);
            return Ok(SignInOutcome::Rejected);
        };

        let record = identity.record();
        if let Err(e) = self.persist(&record) {
            tracing::warn!(email = %email, error = %e, "Failed to persist session");
            self.state.send_modify(|s| s.loading = false);
            return Err(e);
        }

        tracing::info!(email = %record.email, role = %record.role, "Signed in");
        self.state.send_replace(Session::settled(Some(record.clone())));
        Ok(SignInOutcome::Authenticated(record))
    }

    /// Signs in with validated form credentials.
    pub async fn sign_in(&self, credentials: &Credentials) -> Result<SignInOutcome> {
        self.authenticate(credentials.email(), credentials.secret())
            .await
    }

    fn persist(&self, record: &IdentityRecord) -> Result<()> {
        let json = serde_json::to_string(record)?;
        self.storage.set(&self.config.storage_key, &json)
    }

    /// Signs out and removes the persisted record.
    ///
    /// Calling it while signed out is a no-op apart from the storage removal.
    /// The loading flag is left alone, and subscribers are only notified
    /// when an identity was actually signed out. If the record cannot be
    /// removed the session is kept.
    pub fn end_session(&self) -> Result<()> {
        self.storage.remove(&self.config.storage_key)?;

        let mut previous = None;
        self.state.send_if_modified(|s| {
            previous = s.active.take();
            previous.is_some()
        });
        if let Some(record) = previous {
            tracing::info!(email = %record.email, "Signed out");
        }
        Ok(())
    }

    /// The signed-in identity.
    pub fn current_identity(&self) -> Option<IdentityRecord> {
        self.state.borrow().active.clone()
    }

    /// Role of the signed-in identity.
    pub fn role(&self) -> Option<Role> {
        self.state.borrow().role()
    }

    /// Returns true while a restore or credential check is outstanding.
    pub fn is_loading(&self) -> bool {
        self.state.borrow().loading
    }

    /// A snapshot of the session.
    pub fn session(&self) -> Session {
        self.state.borrow().clone()
    }

    /// Observes every change to the session.
    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.state.subscribe()
    }

    /// Gates a navigation request against the current session.
    pub fn admit(&self, destination: &Destination) -> Admission {
        gate::resolve(&self.state.borrow(), destination)
    }

    /// The identity directory.
    pub fn directory(&self) -> &Directory {
        &self.directory
    }

    /// The authority configuration.
    pub fn config(&self) -> &AuthorityConfig {
        &self.config
    }
}

/// Clears the loading flag if a credential check is dropped mid-flight.
struct LoadingGuard<'a>(&'a watch::Sender<Session>);

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.0.send_if_modified(|s| std::mem::replace(&mut s.loading, false));
    }
}
