use lazy_static::lazy_static;
use regex::Regex;

use crate::error::{AccountError, Result};

pub const MIN_USERNAME_LEN: usize = 3;
pub const MIN_PASSWORD_LEN: usize = 8;

pub fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex =
            Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

pub fn validate_email(email: &str) -> Result<()> {
    if !is_valid_email(email) {
        return Err(AccountError::validation("invalid email"));
    }
    Ok(())
}

/// Checked before any storage access.
pub fn validate_new_account(username: &str, password: &str, email: &str) -> Result<()> {
    if username.chars().count() < MIN_USERNAME_LEN {
        return Err(AccountError::validation(format!(
            "username must be at least {MIN_USERNAME_LEN} characters"
        )));
    }
    validate_email(email)?;
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AccountError::validation(format!(
            "password must be at least {MIN_PASSWORD_LEN} characters"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_common_emails() {
        for ok in ["a@b.com", "first.last+tag@mail.example.org", "x_y%z@host-1.io"] {
            assert!(is_valid_email(ok), "{ok}");
        }
    }

    #[test]
    fn rejects_malformed_emails() {
        for bad in ["", "plain", "@b.com", "a@", "a@b", "a@b.c", "a b@c.com", "a@b.c0m"] {
            assert!(!is_valid_email(bad), "{bad}");
        }
    }

    #[test]
    fn username_and_password_lengths() {
        assert!(validate_new_account("bob", "12345678", "b@c.de").is_ok());
        assert!(matches!(
            validate_new_account("bo", "12345678", "b@c.de"),
            Err(AccountError::Validation(_))
        ));
        assert!(matches!(
            validate_new_account("bob", "1234567", "b@c.de"),
            Err(AccountError::Validation(_))
        ));
        assert!(matches!(
            validate_new_account("bob", "12345678", "nope"),
            Err(AccountError::Validation(_))
        ));
    }
}
