use std::path::Path;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use tracing::{debug, error};

use crate::error::{AccountError, Result};

/// SQLite is single-writer; one connection keeps every unit of work serialized.
const MAX_CONNECTIONS: u32 = 1;

const CREATE_USERS_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS users (
        id       INTEGER PRIMARY KEY AUTOINCREMENT,
        username TEXT NOT NULL UNIQUE,
        password TEXT NOT NULL,
        email    TEXT NOT NULL,
        api_key  TEXT NOT NULL UNIQUE
    )
"#;

/// Open (creating if missing) the database file and ensure the schema exists.
pub async fn connect(path: &Path) -> Result<SqlitePool> {
    let options = SqliteConnectOptions::new()
        .filename(path)
        .create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(MAX_CONNECTIONS)
        .connect_with(options)
        .await
        .map_err(|e| {
            error!(error = %e, path = %path.display(), "open database failed");
            AccountError::Storage("could not open database".into())
        })?;

    ensure_schema(&pool).await?;
    debug!(path = %path.display(), "database ready");
    Ok(pool)
}

pub async fn ensure_schema(pool: &SqlitePool) -> Result<()> {
    sqlx::query(CREATE_USERS_TABLE).execute(pool).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::Row;

    #[tokio::test]
    async fn connect_creates_file_and_table() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("users.db");

        let pool = connect(&path).await.expect("connect");
        assert!(path.exists());

        let row = sqlx::query(
            "SELECT COUNT(*) AS n FROM sqlite_master WHERE type = 'table' AND name = 'users'",
        )
        .fetch_one(&pool)
        .await
        .expect("query sqlite_master");
        assert_eq!(row.get::<i64, _>("n"), 1);
    }

    #[tokio::test]
    async fn schema_creation_is_idempotent() {
        let dir = tempfile::tempdir().expect("tempdir");
        let pool = connect(&dir.path().join("users.db")).await.expect("connect");
        ensure_schema(&pool).await.expect("second create");
    }

    #[tokio::test]
    async fn connect_fails_for_missing_directory() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("missing").join("users.db");
        let err = connect(&path).await.unwrap_err();
        assert!(matches!(err, AccountError::Storage(_)));
    }
}
