//! Session authority for GrievanceX.
//!
//! This crate provides:
//! - **Directory**: the fixed set of known identities
//! - **Session authority**: sign-in, sign-out and restore of the one client
//!   session, kept in step with persisted storage
//! - **Storage**: a key-value interface with in-memory and file backends
//! - **Routing gate**: role-based admission of navigation requests
//!
//! # Example
//!
//! ```
//! use grievancex_auth::{gate, Admission, AuthorityConfig, Directory, MemoryStorage, SessionAuthority};
//! use grievancex_types::{Destination, Role};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> grievancex_auth::Result<()> {
//! let config = AuthorityConfig { sign_in_latency_ms: 0, ..Default::default() };
//! let authority = SessionAuthority::new(Directory::builtin(), MemoryStorage::new(), config);
//! authority.restore()?;
//!
//! // Signed out: restricted pages send the visitor to sign in
//! assert_eq!(
//!     gate::check(&authority.session(), &[Role::Administrator]),
//!     Admission::Redirect(Destination::SignIn),
//! );
//!
//! authority.authenticate("citizen@example.com", "citizen123").await?;
//!
//! // Citizens are turned away from admin pages to their own dashboard
//! assert_eq!(
//!     authority.admit(&Destination::Admin),
//!     Admission::Redirect(Destination::Dashboard),
//! );
//! # Ok(())
//! # }
//! ```

mod authority;
mod config;
mod credentials;
mod directory;
mod error;
pub mod gate;
mod session;
mod storage;

pub use authority::{SessionAuthority, SignInOutcome};
pub use config::{AuthorityConfig, RestorePolicy, DEFAULT_SIGN_IN_LATENCY_MS, DEFAULT_STORAGE_KEY};
pub use credentials::Credentials;
pub use directory::Directory;
pub use error::{AuthError, Result};
pub use gate::{Access, Admission};
pub use session::Session;
pub use storage::{FileStorage, MemoryStorage, SessionStorage};
