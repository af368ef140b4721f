//! Navigable pages of the client.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A page a navigation request can target.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "page", rename_all = "snake_case")]
pub enum Destination {
    /// Public landing page (`/`).
    Home,
    /// Sign-in entry point (`/login`).
    SignIn,
    /// Grievance submission form (`/report`).
    Report,
    /// Citizen's own grievances (`/dashboard`).
    Dashboard,
    /// Administrator triage board (`/admin`).
    Admin,
    /// Administrator statistics (`/analytics`).
    Analytics,
    /// A single grievance (`/complaint/:id`).
    Complaint {
        /// Grievance identifier.
        id: String,
    },
    /// Any path without a page.
    NotFound {
        /// The path as requested.
        path: String,
    },
}

impl Destination {
    /// Parses a request path. Unknown paths map to [`Destination::NotFound`].
    pub fn parse(path: &str) -> Self {
        let trimmed = path.trim();
        let normalized = match trimmed.trim_end_matches('/') {
            "" => "/",
            p => p,
        };

        match normalized {
            "/" => Destination::Home,
            "/login" => Destination::SignIn,
            "/report" => Destination::Report,
            "/dashboard" => Destination::Dashboard,
            "/admin" => Destination::Admin,
            "/analytics" => Destination::Analytics,
            other => match other.strip_prefix("/complaint/") {
                Some(id) if !id.is_empty() && !id.contains('/') => Destination::Complaint {
                    id: id.to_string(),
                },
                _ => Destination::NotFound {
                    path: trimmed.to_string(),
                },
            },
        }
    }

    /// The path this destination is served at.
    pub fn path(&self) -> String {
        match self {
            Destination::Home => "/".to_string(),
            Destination::SignIn => "/login".to_string(),
            Destination::Report => "/report".to_string(),
            Destination::Dashboard => "/dashboard".to_string(),
            Destination::Admin => "/admin".to_string(),
            Destination::Analytics => "/analytics".to_string(),
            Destination::Complaint { id } => format!("/complaint/{id}"),
            Destination::NotFound { path } => path.clone(),
        }
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}
