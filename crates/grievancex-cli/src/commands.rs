//! CLI command implementations.

use grievancex_auth::{
    Admission, AuthError, Credentials, Directory, FileStorage, SessionAuthority, SignInOutcome,
};
use grievancex_types::Destination;
use std::io::Write;
use thiserror::Error;

use crate::config::ClientConfig;

/// CLI errors.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("Invalid email or password")]
    Rejected,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, CliError>;

/// Accounts advertised on the sign-in screen.
const DEMO_ACCOUNTS: &[(&str, &str, &str)] = &[
    ("Admin", "admin@grievancex.com", "admin123"),
    ("Citizen", "citizen@example.com", "citizen123"),
];

/// Builds the session authority for this process and restores its session.
pub fn open(config: &ClientConfig) -> Result<SessionAuthority<FileStorage>> {
    let directory = match &config.directory_path {
        Some(path) => Directory::load(path)?,
        None => Directory::builtin(),
    };
    let storage = FileStorage::open(config.storage_path());
    tracing::debug!(path = %storage.path().display(), "Opened session storage");

    let authority = SessionAuthority::new(directory, storage, config.authority.clone());
    authority.restore()?;
    Ok(authority)
}

/// Sign in with an email and password.
pub async fn login(
    authority: &SessionAuthority<FileStorage>,
    email: &str,
    password: &str,
    out: &mut impl Write,
) -> Result<()> {
    let credentials = Credentials::new(email, password)?;

    match authority.sign_in(&credentials).await? {
        SignInOutcome::Authenticated(record) => {
            writeln!(out, "Signed in as {} <{}> ({})", record.name, record.email, record.role)?;
            writeln!(out, "Continue at {}", record.role.home())?;
            Ok(())
        }
        SignInOutcome::Rejected => Err(CliError::Rejected),
    }
}

/// Sign out.
pub fn logout(authority: &SessionAuthority<FileStorage>, out: &mut impl Write) -> Result<()> {
    let was_signed_in = authority.current_identity().is_some();
    authority.end_session()?;

    if was_signed_in {
        writeln!(out, "Signed out")?;
    } else {
        writeln!(out, "Not signed in")?;
    }
    Ok(())
}

/// Show the signed-in identity.
pub fn whoami(authority: &SessionAuthority<FileStorage>, out: &mut impl Write) -> Result<()> {
    match authority.current_identity() {
        Some(record) => {
            writeln!(out, "Name:  {}", record.name)?;
            writeln!(out, "Email: {}", record.email)?;
            writeln!(out, "Role:  {}", record.role)?;
        }
        None => writeln!(out, "Not signed in")?,
    }
    Ok(())
}

/// Show what the routing gate does with a path.
pub fn visit(
    authority: &SessionAuthority<FileStorage>,
    path: &str,
    out: &mut impl Write,
) -> Result<()> {
    let destination = Destination::parse(path);

    match authority.admit(&destination) {
        Admission::Admit => writeln!(out, "{destination}: allowed")?,
        Admission::Redirect(to) => writeln!(out, "{destination}: redirect to {to}")?,
        Admission::Wait => writeln!(out, "{destination}: loading")?,
    }
    Ok(())
}

/// List the demo accounts.
pub fn accounts(out: &mut impl Write) -> Result<()> {
    writeln!(out, "Demo credentials")?;
    writeln!(out, "================")?;
    for (label, email, password) in DEMO_ACCOUNTS {
        writeln!(out, "{label:<8} {email} / {password}")?;
    }
    Ok(())
}
