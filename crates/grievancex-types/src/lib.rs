//! Common types for GrievanceX.
//!
//! These types are shared by the session authority and its front-ends:
//!
//! - [`Role`] - what a signed-in identity is allowed to see
//! - [`Identity`] / [`IdentityRecord`] - directory entries and their
//!   secret-free projection held by a session
//! - [`Destination`] - the navigable pages of the client

mod destination;
mod identity;
mod role;

pub use destination::Destination;
pub use identity::{Identity, IdentityRecord};
pub use role::{ParseRoleError, Role};
