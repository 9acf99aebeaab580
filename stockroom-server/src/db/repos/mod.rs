//! Repository implementations for database access
//!
//! Each repository borrows the pool for the duration of one request and
//! returns typed outcomes: a record, `NotFound`, `DuplicateEmail`, or an
//! opaque storage failure.

pub mod items;
pub mod users;

pub use items::{Item, ItemRepo};
pub use users::{User, UserRepo};

use crate::credentials::CredentialError;

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("not found: {resource} '{id}'")]
    NotFound { resource: &'static str, id: String },

    #[error("email already exists: '{email}'")]
    DuplicateEmail { email: String },

    #[error(transparent)]
    Credential(#[from] CredentialError),
}

impl DbError {
    pub(crate) fn not_found(resource: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            resource,
            id: id.to_string(),
        }
    }
}

/// True when the store rejected a write because of the named unique constraint.
pub(crate) fn violates_unique(err: &sqlx::Error, constraint: &str) -> bool {
    match err {
        sqlx::Error::Database(db_err) => {
            db_err.is_unique_violation() && db_err.constraint() == Some(constraint)
        }
        _ => false,
    }
}
