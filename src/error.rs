use thiserror::Error;
use tracing::error;

use crate::accounts::UserId;

pub type Result<T> = std::result::Result<T, AccountError>;

/// Failures surfaced by the account store.
///
/// Messages are safe to show to a caller. Driver-level detail for
/// `Storage` goes to the log only.
#[derive(Debug, Error)]
pub enum AccountError {
    /// Bad input; storage was never touched.
    #[error("validation failed: {0}")]
    Validation(String),

    /// A unique column already holds this value.
    #[error("{field} already exists")]
    Duplicate { field: &'static str },

    /// The requester is not the user being modified.
    #[error("user {requester} may not modify user {target}")]
    Authorization { target: UserId, requester: UserId },

    /// The engine failed, or stored data could not be read back.
    #[error("storage error: {0}")]
    Storage(String),
}

impl AccountError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn is_duplicate(&self) -> bool {
        matches!(self, Self::Duplicate { .. })
    }
}

impl From<sqlx::Error> for AccountError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.is_unique_violation() {
                return Self::Duplicate {
                    field: duplicate_field(db_err.message()),
                };
            }
        }
        error!(error = %err, "database operation failed");
        Self::Storage("database operation failed".into())
    }
}

/// SQLite reports `UNIQUE constraint failed: users.<column>`.
fn duplicate_field(message: &str) -> &'static str {
    if message.contains("users.api_key") {
        "api_key"
    } else {
        "username"
    }
}
