//! User field validation
//!
//! User fields are free text. The only limit is the column width; an
//! empty name, email or password is accepted.

use std::fmt;

use super::validation::max_chars;
use super::ValidationError;

/// Maximum length for user names (matches `VARCHAR(100)`)
pub const MAX_USER_NAME_LEN: usize = 100;

/// Maximum length for emails (matches `VARCHAR(100)`)
pub const MAX_EMAIL_LEN: usize = 100;

/// User display name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserName(String);

impl UserName {
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        max_chars("name", s, MAX_USER_NAME_LEN)?;
        Ok(Self(s.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// User email, unique across users.
///
/// The shape is not checked; uniqueness is left to the store.
///
/// # Example
/// ```
/// use stockroom_server::models::Email;
///
/// assert!(Email::new("test@example.com").is_ok());
/// assert!(Email::new("no-at-sign").is_ok());
/// assert!(Email::new(&"a".repeat(101)).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Email(String);

impl Email {
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        max_chars("email", s, MAX_EMAIL_LEN)?;
        Ok(Self(s.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Plaintext password on its way to the hasher.
///
/// `Debug` is redacted so the value never ends up in logs.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(String);

impl Password {
    pub fn new(s: &str) -> Self {
        Self(s.to_owned())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(<redacted>)")
    }
}

/// Validated input for creating a user
#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub name: UserName,
    pub email: Email,
    pub password: Password,
}

impl NewUser {
    pub fn new(name: &str, email: &str, password: &str) -> Result<Self, ValidationError> {
        Ok(Self {
            name: UserName::new(name)?,
            email: Email::new(email)?,
            password: Password::new(password),
        })
    }
}

/// Partial update for a user: one slot per mutable attribute.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserUpdate {
    pub name: Option<UserName>,
    pub email: Option<Email>,
    pub password: Option<Password>,
}

impl UserUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.password.is_none()
    }
}
