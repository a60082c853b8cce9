//! Authentication primitives: login credentials and the caller identity.
//!
//! Keep inbound payload parsing outside the domain by exposing constructors
//! that validate string inputs before a handler talks to a port or service.

use std::fmt;

use zeroize::Zeroizing;

use crate::domain::user::{EmailAddress, Role, UserId};

/// Domain error returned when login payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginValidationError {
    /// Email was missing, blank, or not shaped like an address.
    InvalidEmail,
    /// Password was blank.
    EmptyPassword,
}

impl fmt::Display for LoginValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidEmail => write!(f, "email must look like local@domain"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
        }
    }
}

impl std::error::Error for LoginValidationError {}

/// Validated login credentials used by the authenticator port.
///
/// ## Invariants
/// - `email` is trimmed, lower-cased and structurally valid.
/// - `password` is required to be non-empty but retains caller-provided
///   whitespace to avoid surprising credential comparisons.
///
/// # Examples
/// ```
/// use booking_backend::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts("Ada@Example.EDU", "s3cret")?;
/// assert_eq!(creds.email().as_ref(), "ada@example.edu");
/// # Ok::<(), booking_backend::domain::auth::LoginValidationError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    email: EmailAddress,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw email/password inputs.
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, LoginValidationError> {
        let email =
            EmailAddress::new(email).map_err(|_| LoginValidationError::InvalidEmail)?;

        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }

        Ok(Self {
            email,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Email address suitable for user lookups.
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Password string provided by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Authenticated caller attached to a session.
///
/// Handlers read this from the session cookie and pass it to the services
/// so authorisation decisions stay close to the business rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    /// Identifier of the authenticated user.
    pub user_id: UserId,
    /// Role the user held when the session was established.
    pub role: Role,
}

impl Identity {
    /// Whether the caller holds the administrator role.
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}
