use sqlx::SqliteConnection;

use crate::accounts::repo_types::{PublicUser, UserCredentials, UserId};

/// Insert a new row and return its id. Uniqueness is left to the table constraints.
pub(crate) async fn insert_user(
    conn: &mut SqliteConnection,
    username: &str,
    password_hash: &str,
    email: &str,
    api_key: &str,
) -> sqlx::Result<UserId> {
    let id = sqlx::query_scalar::<_, UserId>(
        r#"
        INSERT INTO users (username, password, email, api_key)
        VALUES (?, ?, ?, ?)
        RETURNING id
        "#,
    )
    .bind(username)
    .bind(password_hash)
    .bind(email)
    .bind(api_key)
    .fetch_one(conn)
    .await?;
    Ok(id)
}

pub(crate) async fn find_credentials(
    conn: &mut SqliteConnection,
    username: &str,
) -> sqlx::Result<Option<UserCredentials>> {
    sqlx::query_as::<_, UserCredentials>(
        r#"
        SELECT id, password
        FROM users
        WHERE username = ?
        "#,
    )
    .bind(username)
    .fetch_optional(conn)
    .await
}

pub(crate) async fn find_public_by_id(
    conn: &mut SqliteConnection,
    id: UserId,
) -> sqlx::Result<Option<PublicUser>> {
    sqlx::query_as::<_, PublicUser>(
        r#"
        SELECT id, username, email
        FROM users
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(conn)
    .await
}

pub(crate) async fn find_public_by_username(
    conn: &mut SqliteConnection,
    username: &str,
) -> sqlx::Result<Option<PublicUser>> {
    sqlx::query_as::<_, PublicUser>(
        r#"
        SELECT id, username, email
        FROM users
        WHERE username = ?
        "#,
    )
    .bind(username)
    .fetch_optional(conn)
    .await
}

/// Returns the number of rows changed (0 or 1).
pub(crate) async fn set_email(
    conn: &mut SqliteConnection,
    id: UserId,
    email: &str,
) -> sqlx::Result<u64> {
    let res = sqlx::query("UPDATE users SET email = ? WHERE id = ?")
        .bind(email)
        .bind(id)
        .execute(conn)
        .await?;
    Ok(res.rows_affected())
}
