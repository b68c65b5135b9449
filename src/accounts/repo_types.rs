use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::error::AccountError;

/// Store-assigned primary key of a user record.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, sqlx::Type,
)]
#[serde(transparent)]
#[sqlx(transparent)]
pub struct UserId(pub i64);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for UserId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl FromStr for UserId {
    type Err = AccountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<i64>()
            .map(Self)
            .map_err(|_| AccountError::validation(format!("user id must be an integer, got {s:?}")))
    }
}

impl TryFrom<&str> for UserId {
    type Error = AccountError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// Public part of a user record. Never carries the hash or API key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct PublicUser {
    pub id: UserId,
    pub username: String,
    pub email: String,
}

/// What authentication needs from a row.
#[derive(Debug, FromRow)]
pub(crate) struct UserCredentials {
    pub id: UserId,
    #[sqlx(rename = "password")]
    pub password_hash: String, // Argon2 PHC string
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_integer_ids() {
        assert_eq!("42".parse::<UserId>().unwrap(), UserId(42));
        assert_eq!(UserId::try_from("-7").unwrap(), UserId(-7));
    }

    #[test]
    fn rejects_non_integer_ids() {
        for bad in ["", "abc", "1.5", " 3", "1e3"] {
            let err = bad.parse::<UserId>().unwrap_err();
            assert!(matches!(err, AccountError::Validation(_)), "{bad:?}");
        }
    }

    #[test]
    fn public_user_serialization_has_no_secrets() {
        let user = PublicUser {
            id: UserId(1),
            username: "alice".into(),
            email: "a@b.com".into(),
        };
        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "id": 1, "username": "alice", "email": "a@b.com" })
        );
    }
}
