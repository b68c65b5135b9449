//! The account store: create, authenticate, read and update user records.
//!
//! Every operation takes its connection (or transaction) from the pool at the
//! start and drops it before returning. Writes run in a single transaction,
//! so an early `?` return rolls back instead of leaving a partial row.

use std::path::{Path, PathBuf};

use lazy_static::lazy_static;
use sqlx::SqlitePool;
use tracing::{debug, info, instrument, warn};

use crate::config::{AppConfig, DEFAULT_DATABASE_PATH};
use crate::db;
use crate::error::{AccountError, Result};

pub mod api_key;
pub mod password;
mod repo;
mod repo_types;
pub mod validation;

pub use repo_types::{PublicUser, UserId};

lazy_static! {
    /// Verified against when the username is unknown, so a miss costs one Argon2 run too.
    static ref DUMMY_HASH: Option<String> =
        password::hash_password("account-store-dummy-password").ok();
}

/// Handle on the `users` table.
///
/// Callers only ever get back ids and [`PublicUser`]; the raw pool stays
/// private so hashes and API keys cannot be queried through it:
///
/// ```compile_fail
/// # async fn read_secrets(store: account_store::AccountStore) {
/// let _ = sqlx::query("SELECT password, api_key FROM users").fetch_one(store.pool());
/// # }
/// ```
pub struct AccountStore {
    pool: SqlitePool,
    path: PathBuf,
}

impl AccountStore {
    /// Open the store at `path`, or `users.db` when `None`.
    pub async fn open(path: Option<&Path>) -> Result<Self> {
        let path = path
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATABASE_PATH));
        let pool = db::connect(&path).await?;
        info!(path = %path.display(), "account store opened");
        Ok(Self { pool, path })
    }

    pub async fn from_config(config: &AppConfig) -> Result<Self> {
        Self::open(Some(&config.database_path)).await
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    #[cfg(test)]
    pub(crate) fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub async fn close(self) {
        self.pool.close().await;
        debug!(path = %self.path.display(), "account store closed");
    }

    /// Register a new user and return its id.
    #[instrument(skip_all, fields(username = %username))]
    pub async fn create(&self, username: &str, password: &str, email: &str) -> Result<UserId> {
        let email = email.trim();
        validation::validate_new_account(username, password, email).map_err(|e| {
            warn!(error = %e, "create rejected");
            e
        })?;

        // Argon2 runs inline on this task.
        let hash = password::hash_password(password)?;
        let key = api_key::generate_api_key();

        let mut tx = self.pool.begin().await?;
        let id = match repo::insert_user(&mut tx, username, &hash, email, &key).await {
            Ok(id) => id,
            Err(e) => {
                let err = AccountError::from(e);
                if let AccountError::Duplicate { field } = &err {
                    warn!(field = *field, "user already exists");
                }
                return Err(err);
            }
        };
        tx.commit().await?;

        info!(user_id = %id, api_key = %api_key::redact(&key), "user created");
        Ok(id)
    }

    /// `Ok(None)` for empty input, unknown user or wrong password.
    #[instrument(skip_all, fields(username = %username))]
    pub async fn authenticate(&self, username: &str, password: &str) -> Result<Option<UserId>> {
        if username.is_empty() || password.is_empty() {
            warn!("authentication with empty credentials");
            return Ok(None);
        }

        let creds = {
            let mut conn = self.pool.acquire().await?;
            repo::find_credentials(&mut conn, username).await?
        };

        let Some(creds) = creds else {
            if let Some(dummy) = DUMMY_HASH.as_deref() {
                let _ = password::verify_password(password, dummy);
            }
            warn!("authentication failed: unknown user");
            return Ok(None);
        };

        if password::verify_password(password, &creds.password_hash)? {
            info!(user_id = %creds.id, "user authenticated");
            Ok(Some(creds.id))
        } else {
            warn!(user_id = %creds.id, "authentication failed: wrong password");
            Ok(None)
        }
    }

    #[instrument(skip(self))]
    pub async fn get_by_id(&self, user_id: UserId) -> Result<Option<PublicUser>> {
        let mut conn = self.pool.acquire().await?;
        let user = repo::find_public_by_id(&mut conn, user_id).await?;
        if user.is_none() {
            debug!("no user with this id");
        }
        Ok(user)
    }

    #[instrument(skip(self))]
    pub async fn find_by_username(&self, username: &str) -> Result<Option<PublicUser>> {
        let mut conn = self.pool.acquire().await?;
        Ok(repo::find_public_by_username(&mut conn, username).await?)
    }

    /// Change the email of `target_id`. Only the user themself may do this.
    ///
    /// Returns `false` when no such user exists.
    #[instrument(skip(self, new_email))]
    pub async fn update_email(
        &self,
        target_id: UserId,
        requester_id: UserId,
        new_email: &str,
    ) -> Result<bool> {
        if requester_id != target_id {
            warn!("email update denied");
            return Err(AccountError::Authorization {
                target: target_id,
                requester: requester_id,
            });
        }

        let new_email = new_email.trim();
        validation::validate_email(new_email)?;

        let mut tx = self.pool.begin().await?;
        let changed = repo::set_email(&mut tx, target_id, new_email).await?;
        tx.commit().await?;

        if changed == 0 {
            warn!("email update: user not found");
            return Ok(false);
        }
        info!(user_id = %target_id, "email updated");
        Ok(true)
    }
}
