//! Session identity, login credentials, and the per-session cart.
//!
//! Sessions are never persisted. Logging out drops the session and with it
//! the cart.

use std::fmt;

use zeroize::Zeroizing;

use super::{Cart, EateryError};

/// Display name given to customers who log in without signing up.
pub const DEFAULT_CUSTOMER_NAME: &str = "Valued Customer";

/// Display name of the administrator session.
pub const ADMIN_NAME: &str = "Admin";

/// Raised when login or signup input is incomplete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionValidationError {
    /// Email was blank once trimmed.
    EmptyEmail,
    /// Password was empty.
    EmptyPassword,
    /// Signup name was blank once trimmed.
    BlankName,
}

impl fmt::Display for SessionValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyEmail => write!(f, "email must not be empty"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
            Self::BlankName => write!(f, "name must not be empty"),
        }
    }
}

impl std::error::Error for SessionValidationError {}

impl From<SessionValidationError> for EateryError {
    fn from(value: SessionValidationError) -> Self {
        Self::invalid_request(value.to_string())
    }
}

/// Validated login form input.
///
/// The password keeps caller whitespace and is wiped on drop.
///
/// # Examples
/// ```
/// use eatery::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts(" admin@elha.com ", "admin123")
///     .expect("valid credentials");
/// assert_eq!(creds.email(), "admin@elha.com");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    email: String,
    password: Zeroizing<String>,
}

impl fmt::Debug for LoginCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginCredentials")
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

impl LoginCredentials {
    /// Validate raw email and password input.
    ///
    /// # Errors
    ///
    /// Returns [`SessionValidationError`] when either field is empty.
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, SessionValidationError> {
        let trimmed = email.trim();
        if trimmed.is_empty() {
            return Err(SessionValidationError::EmptyEmail);
        }
        if password.is_empty() {
            return Err(SessionValidationError::EmptyPassword);
        }
        Ok(Self {
            email: trimmed.to_owned(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Trimmed email address.
    #[must_use]
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Password exactly as typed.
    #[must_use]
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Identity of whoever is driving the current session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionUser {
    name: String,
    email: String,
    is_admin: bool,
}

impl SessionUser {
    /// The administrator identity.
    #[must_use]
    pub fn admin(email: &str) -> Self {
        Self {
            name: ADMIN_NAME.to_owned(),
            email: email.to_owned(),
            is_admin: true,
        }
    }

    /// A customer identity.
    ///
    /// # Errors
    ///
    /// Returns [`SessionValidationError`] for a blank name or email.
    pub fn customer(name: &str, email: &str) -> Result<Self, SessionValidationError> {
        let trimmed_name = name.trim();
        if trimmed_name.is_empty() {
            return Err(SessionValidationError::BlankName);
        }
        let trimmed_email = email.trim();
        if trimmed_email.is_empty() {
            return Err(SessionValidationError::EmptyEmail);
        }
        Ok(Self {
            name: trimmed_name.to_owned(),
            email: trimmed_email.to_owned(),
            is_admin: false,
        })
    }

    /// Display name; orders are recorded under it.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Email used to log in or sign up.
    #[must_use]
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Whether this is the administrator.
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        self.is_admin
    }
}

/// An active session: who is logged in and what they have selected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    user: SessionUser,
    cart: Cart,
}

impl Session {
    /// Start a session with an empty cart.
    #[must_use]
    pub fn start(user: SessionUser) -> Self {
        Self {
            user,
            cart: Cart::default(),
        }
    }

    /// The logged-in identity.
    #[must_use]
    pub const fn user(&self) -> &SessionUser {
        &self.user
    }

    /// Read-only view of the cart.
    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    pub(crate) const fn cart_mut(&mut self) -> &mut Cart {
        &mut self.cart
    }
}
