//! Driving port that turns login credentials into a session identity.
//!
//! Inbound adapters call it without knowing where the admin account is
//! configured, so tests can substitute a double.

use zeroize::Zeroizing;

use crate::domain::{DEFAULT_CUSTOMER_NAME, EateryError, LoginCredentials, SessionUser};

/// Domain use-case port for authentication.
#[cfg_attr(test, mockall::automock)]
pub trait LoginService: Send + Sync {
    /// Resolve credentials into the identity of the new session.
    fn authenticate(&self, credentials: &LoginCredentials) -> Result<SessionUser, EateryError>;
}

/// Authenticator backed by a single configured admin account.
///
/// Matching credentials yield the admin identity. Any other credentials log
/// in as a generic customer; there is no customer account store.
#[derive(Clone)]
pub struct ConfiguredLoginService {
    admin_email: String,
    admin_password: Zeroizing<String>,
}

impl ConfiguredLoginService {
    /// Build the service from the configured admin account.
    #[must_use]
    pub fn new(admin_email: &str, admin_password: &str) -> Self {
        Self {
            admin_email: admin_email.trim().to_owned(),
            admin_password: Zeroizing::new(admin_password.to_owned()),
        }
    }
}

impl std::fmt::Debug for ConfiguredLoginService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfiguredLoginService")
            .field("admin_email", &self.admin_email)
            .finish_non_exhaustive()
    }
}

impl LoginService for ConfiguredLoginService {
    fn authenticate(&self, credentials: &LoginCredentials) -> Result<SessionUser, EateryError> {
        if credentials.email() == self.admin_email
            && credentials.password() == self.admin_password.as_str()
        {
            return Ok(SessionUser::admin(credentials.email()));
        }
        Ok(SessionUser::customer(DEFAULT_CUSTOMER_NAME, credentials.email())?)
    }
}
