//! # Sign-in Credentials
//!
//! The contact address and secret entered on the sign-in form.

use std::fmt;

use crate::error::{AuthError, Result};

/// A filled-in sign-in form.
///
/// Construction checks that neither field is blank, so an empty form never
/// reaches the credential check.
#[derive(Clone)]
pub struct Credentials {
    email: String,
    secret: String,
}

impl Credentials {
    /// Validates and wraps the form fields.
    ///
    /// The contact address is trimmed; the secret is kept verbatim.
    pub fn new(email: impl Into<String>, secret: impl Into<String>) -> Result<Self> {
        let email = email.into().trim().to_string();
        let secret = secret.into();

        if email.is_empty() {
            return Err(AuthError::MissingField("email"));
        }
        if secret.trim().is_empty() {
            return Err(AuthError::MissingField("password"));
        }

        Ok(Self { email, secret })
    }

    /// The contact address.
    pub fn email(&self) -> &str {
        &self.email
    }

    pub(crate) fn secret(&self) -> &str {
        &self.secret
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("secret", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credentials_new() {
        let creds = Credentials::new("  citizen@example.com ", "citizen123").unwrap();

        assert_eq!(creds.email(), "citizen@example.com");
        assert_eq!(creds.secret(), "citizen123");
    }

    #[test]
    fn test_missing_fields() {
        assert!(matches!(
            Credentials::new("", "pw"),
            Err(AuthError::MissingField("email"))
        ));
        assert!(matches!(
            Credentials::new("a@x.com", "   "),
            Err(AuthError::MissingField("password"))
        ));
    }

    #[test]
    fn test_debug_redacts_secret() {
        let creds = Credentials::new("a@x.com", "hunter2").unwrap();
        assert!(!format!("{creds:?}").contains("hunter2"));
    }
}
