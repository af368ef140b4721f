//! Role-based routing gate.
//!
//! Decides, from the current [`Session`], whether a navigation request is
//! admitted, redirected, or has to wait for the session to settle.

use grievancex_types::{Destination, Role};

use crate::session::Session;

/// Outcome of a navigation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Admission {
    /// The session is still loading; show a neutral waiting state.
    Wait,
    /// Navigate somewhere else instead.
    Redirect(Destination),
    /// Render the requested page.
    Admit,
}

impl Admission {
    /// Returns true if the request was admitted.
    pub fn is_admitted(&self) -> bool {
        matches!(self, Admission::Admit)
    }
}

/// Who may open a destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// Anyone, gate not consulted.
    Open,
    /// Signed-out visitors only; signed-in users are sent to their home.
    PublicOnly,
    /// Signed-in users holding one of these roles.
    Restricted(&'static [Role]),
}

const ADMINISTRATORS: &[Role] = &[Role::Administrator];
const CITIZENS: &[Role] = &[Role::Citizen];

impl Access {
    /// The access rule of a destination.
    pub fn of(destination: &Destination) -> Self {
        match destination {
            Destination::Home | Destination::SignIn => Access::PublicOnly,
            Destination::Report | Destination::Dashboard => Access::Restricted(CITIZENS),
            Destination::Admin | Destination::Analytics => Access::Restricted(ADMINISTRATORS),
            Destination::Complaint { .. } | Destination::NotFound { .. } => Access::Open,
        }
    }
}

/// Gates a page that requires one of `required` roles.
///
/// A signed-in user whose role is not required is sent to their role's
/// landing page, never to the sign-in page.
pub fn check(session: &Session, required: &[Role]) -> Admission {
    if session.loading {
        return Admission::Wait;
    }

    match session.role() {
        None => Admission::Redirect(Destination::SignIn),
        Some(role) if !required.contains(&role) => Admission::Redirect(role.landing()),
        Some(_) => Admission::Admit,
    }
}

/// Gates a navigation request using the route table.
///
/// Nothing is rendered while the session is loading, open pages included.
pub fn resolve(session: &Session, destination: &Destination) -> Admission {
    if session.loading {
        return Admission::Wait;
    }

    match Access::of(destination) {
        Access::Open => Admission::Admit,
        Access::Restricted(required) => check(session, required),
        Access::PublicOnly => match session.role() {
            Some(role) => Admission::Redirect(role.home()),
            None => Admission::Admit,
        },
    }
}
