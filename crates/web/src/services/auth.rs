//! Admin login gate.
//!
//! Two states: anonymous and admin. The gate compares submitted credentials
//! against the configured admin username/password; the resulting admin flag
//! lives in the visitor's session and is re-read from there on every admin
//! request (see [`crate::middleware::RequireAdmin`]), never cached in process
//! state.

use secrecy::ExposeSecret;
use thiserror::Error;
use tower_sessions::Session;

use crate::config::AdminCredentials;
use crate::models::session_keys;

/// Errors from the auth gate.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Submitted credentials do not match.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Session store failure while reading or writing the admin flag.
    #[error("session error: {0}")]
    Session(#[from] tower_sessions::session::Error),
}

/// Credential checker for the admin panel.
#[derive(Clone)]
pub struct AuthGate {
    credentials: AdminCredentials,
}

impl AuthGate {
    /// Create a gate over the configured credentials.
    #[must_use]
    pub const fn new(credentials: AdminCredentials) -> Self {
        Self { credentials }
    }

    /// Check a username/password pair.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidCredentials`] on mismatch. No lockout, no
    /// rate limiting - failures only surface a notice to the user.
    pub fn verify(&self, username: &str, password: &str) -> Result<(), AuthError> {
        if username == self.credentials.username
            && password == self.credentials.password.expose_secret()
        {
            Ok(())
        } else {
            Err(AuthError::InvalidCredentials)
        }
    }

    /// Log in: verify credentials and persist the admin flag in the session.
    ///
    /// A failed check leaves the session untouched.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidCredentials`] on mismatch, or
    /// [`AuthError::Session`] if the flag cannot be stored.
    pub async fn login(
        &self,
        session: &Session,
        username: &str,
        password: &str,
    ) -> Result<(), AuthError> {
        self.verify(username, password)?;
        session.insert(session_keys::IS_ADMIN, true).await?;
        Ok(())
    }

    /// Log out: clear the admin flag unconditionally.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Session`] if the session store fails.
    pub async fn logout(&self, session: &Session) -> Result<(), AuthError> {
        session.remove::<bool>(session_keys::IS_ADMIN).await?;
        Ok(())
    }
}

/// Whether the session holds a previously successful admin login.
pub async fn is_admin(session: &Session) -> bool {
    session
        .get::<bool>(session_keys::IS_ADMIN)
        .await
        .ok()
        .flatten()
        .unwrap_or(false)
}
