//! Optional subscriber setup for the engine's `tracing` events.
//!
//! The engine only emits events; hosts that already install a subscriber
//! can ignore this module.

use crate::error::BoxError;
use tracing_subscriber::EnvFilter;

/// Filter directives, e.g. `casework=debug`.
pub const LOG_ENV: &str = "CASEWORK_LOG";
/// When set, logs go to stdout instead of stderr.
pub const STDOUT_ENV: &str = "CASEWORK_LOG_STDOUT";

/// `CASEWORK_LOG`, then `RUST_LOG`, then `info`.
pub fn filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Installs a global fmt subscriber.
///
/// # Errors
///
/// Fails if a global subscriber is already set.
pub fn try_init() -> Result<(), BoxError> {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter())
        .with_target(false);

    if std::env::var_os(STDOUT_ENV).is_some() {
        builder.with_writer(std::io::stdout).try_init()
    } else {
        builder.with_writer(std::io::stderr).try_init()
    }
}

/// Like [`try_init`], but keeps an already installed subscriber.
pub fn init() {
    if let Err(e) = try_init() {
        tracing::debug!("subscriber not installed: {}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_init_fails() {
        init();
        assert!(try_init().is_err());
    }
}
