//! A small SQLite-backed user account store with Argon2 password hashing.

pub mod accounts;
pub mod config;
pub mod db;
pub mod error;
pub mod telemetry;

pub use accounts::{AccountStore, PublicUser, UserId};
pub use error::{AccountError, Result};
