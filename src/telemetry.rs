use std::fs::OpenOptions;
use std::sync::Mutex;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use crate::config::LogConfig;

/// Install the process-wide subscriber. Call once, before opening a store.
pub fn init(cfg: &LogConfig) -> anyhow::Result<()> {
    let filter = EnvFilter::try_new(&cfg.filter)
        .with_context(|| format!("invalid log filter {:?}", cfg.filter))?;

    match &cfg.file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("open log file {}", path.display()))?;
            let builder = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file));
            if cfg.json {
                builder.with_target(false).json().try_init()
            } else {
                builder.try_init()
            }
        }
        None => {
            let builder = tracing_subscriber::fmt().with_env_filter(filter);
            if cfg.json {
                builder.with_target(false).json().try_init()
            } else {
                builder.try_init()
            }
        }
    }
    .map_err(|e| anyhow::anyhow!(e.to_string()))
    .context("logging already initialized")
}
