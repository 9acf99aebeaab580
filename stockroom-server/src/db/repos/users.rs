//! User repository
//!
//! Passwords are hashed before the transaction opens. Email uniqueness is
//! left to the `users_email_unique` constraint; a violation is read from the
//! store's error code, the transaction is rolled back, and the caller gets
//! `DbError::DuplicateEmail`.

use sqlx::{FromRow, PgPool, Postgres, Transaction};

use super::{violates_unique, DbError};
use crate::credentials::{hash_password_blocking, CredentialError};
use crate::db::schema::USERS_EMAIL_CONSTRAINT;
use crate::models::{Email, NewUser, Pagination, UserName, UserUpdate};

/// User record from database.
///
/// Carries the stored hash; HTTP responses are built from the other fields.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct User {
    pub id: i32,
    pub name: String,
    pub email: String,
    #[sqlx(rename = "password")]
    pub password_hash: String,
}

/// A `UserUpdate` whose password slot has been hashed.
#[derive(Debug, Default)]
pub struct UserChanges {
    pub name: Option<UserName>,
    pub email: Option<Email>,
    pub password_hash: Option<String>,
}

impl UserChanges {
    /// Hash the new password, if one was supplied.
    pub async fn from_update(update: UserUpdate) -> Result<Self, CredentialError> {
        let password_hash = match update.password {
            Some(password) => Some(hash_password_blocking(password.into_inner()).await?),
            None => None,
        };

        Ok(Self {
            name: update.name,
            email: update.email,
            password_hash,
        })
    }

    fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.password_hash.is_none()
    }
}

impl User {
    /// Overwrite only the slots that are set in `changes`.
    pub fn apply(&mut self, changes: UserChanges) {
        if let Some(name) = changes.name {
            self.name = name.as_str().to_owned();
        }
        if let Some(email) = changes.email {
            self.email = email.as_str().to_owned();
        }
        if let Some(hash) = changes.password_hash {
            self.password_hash = hash;
        }
    }
}

/// Map a failed write: email constraint violations become a conflict.
async fn rollback_with(
    tx: Transaction<'_, Postgres>,
    err: sqlx::Error,
    email: &str,
) -> DbError {
    if let Err(rollback_err) = tx.rollback().await {
        tracing::warn!("rollback after failed user write: {}", rollback_err);
    }

    if violates_unique(&err, USERS_EMAIL_CONSTRAINT) {
        DbError::DuplicateEmail {
            email: email.to_owned(),
        }
    } else {
        DbError::Sqlx(err)
    }
}

/// User repository
pub struct UserRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> UserRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Hash the password and insert the user.
    pub async fn create(&self, new: NewUser) -> Result<User, DbError> {
        let NewUser {
            name,
            email,
            password,
        } = new;
        let password_hash = hash_password_blocking(password.into_inner()).await?;

        let mut tx = self.pool.begin().await?;

        let inserted = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (name, email, password)
            VALUES ($1, $2, $3)
            RETURNING id, name, email, password
            "#,
        )
        .bind(name.as_str())
        .bind(email.as_str())
        .bind(password_hash.as_str())
        .fetch_one(&mut *tx)
        .await;

        let user = match inserted {
            Ok(user) => user,
            Err(err) => return Err(rollback_with(tx, err, email.as_str()).await),
        };

        tx.commit().await?;
        tracing::debug!(user_id = user.id, "user created");
        Ok(user)
    }

    /// Get a single user by id.
    pub async fn get(&self, id: i32) -> Result<User, DbError> {
        sqlx::query_as(
            r#"
            SELECT id, name, email, password
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or_else(|| DbError::not_found("user", id))
    }

    /// Look a user up by exact email.
    pub async fn get_by_email(&self, email: &str) -> Result<Option<User>, DbError> {
        let user = sqlx::query_as(
            r#"
            SELECT id, name, email, password
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(self.pool)
        .await?;

        Ok(user)
    }

    /// List users in insertion order.
    pub async fn list(&self, page: Pagination) -> Result<Vec<User>, DbError> {
        let users = sqlx::query_as(
            r#"
            SELECT id, name, email, password
            FROM users
            ORDER BY id
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(self.pool)
        .await?;

        Ok(users)
    }

    /// Apply a partial update, hashing a new password first.
    pub async fn update(&self, id: i32, update: UserUpdate) -> Result<User, DbError> {
        let changes = UserChanges::from_update(update).await?;

        let mut tx = self.pool.begin().await?;

        let mut user: User = sqlx::query_as(
            r#"
            SELECT id, name, email, password
            FROM users
            WHERE id = $1
            FOR UPDATE
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| DbError::not_found("user", id))?;

        if changes.is_empty() {
            tx.commit().await?;
            return Ok(user);
        }

        user.apply(changes);

        let updated = sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET name = $2, email = $3, password = $4
            WHERE id = $1
            RETURNING id, name, email, password
            "#,
        )
        .bind(user.id)
        .bind(user.name.as_str())
        .bind(user.email.as_str())
        .bind(user.password_hash.as_str())
        .fetch_one(&mut *tx)
        .await;

        let updated = match updated {
            Ok(updated) => updated,
            Err(err) => return Err(rollback_with(tx, err, &user.email).await),
        };

        tx.commit().await?;
        tracing::debug!(user_id = updated.id, "user updated");
        Ok(updated)
    }

    /// Delete a user by id.
    pub async fn delete(&self, id: i32) -> Result<(), DbError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("user", id));
        }

        tracing::debug!(user_id = id, "user deleted");
        Ok(())
    }
}
