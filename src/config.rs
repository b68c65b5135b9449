use std::path::PathBuf;

use serde::Deserialize;

pub const DEFAULT_DATABASE_PATH: &str = "users.db";

#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    pub filter: String,
    pub json: bool,
    /// Append log lines here instead of stderr.
    pub file: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_path: PathBuf,
    pub log: LogConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from(DEFAULT_DATABASE_PATH),
            log: LogConfig {
                filter: "account_store=info".into(),
                json: false,
                file: None,
            },
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(var: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let log = LogConfig {
            filter: var("RUST_LOG").unwrap_or(defaults.log.filter),
            json: var("LOG_FORMAT").map(|v| v == "json").unwrap_or(false),
            file: var("LOG_FILE").filter(|v| !v.is_empty()).map(PathBuf::from),
        };
        Self {
            database_path: var("DATABASE_PATH")
                .filter(|v| !v.is_empty())
                .map(PathBuf::from)
                .unwrap_or(defaults.database_path),
            log,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_env_is_empty() {
        let cfg = AppConfig::from_lookup(lookup(&[]));
        assert_eq!(cfg.database_path, PathBuf::from("users.db"));
        assert_eq!(cfg.log.filter, "account_store=info");
        assert!(!cfg.log.json);
        assert!(cfg.log.file.is_none());
    }

    #[test]
    fn reads_overrides() {
        let cfg = AppConfig::from_lookup(lookup(&[
            ("DATABASE_PATH", "/tmp/accounts.db"),
            ("RUST_LOG", "debug"),
            ("LOG_FORMAT", "json"),
            ("LOG_FILE", "/tmp/accounts.log"),
        ]));
        assert_eq!(cfg.database_path, PathBuf::from("/tmp/accounts.db"));
        assert_eq!(cfg.log.filter, "debug");
        assert!(cfg.log.json);
        assert_eq!(cfg.log.file, Some(PathBuf::from("/tmp/accounts.log")));
    }

    #[test]
    fn blank_database_path_falls_back_to_default() {
        let cfg = AppConfig::from_lookup(lookup(&[("DATABASE_PATH", "")]));
        assert_eq!(cfg.database_path, PathBuf::from(DEFAULT_DATABASE_PATH));
    }
}
