//! Hypersweep Tools
//!
//! CLI tools for turning parameter specs into simulation scripts.

pub mod commands;
pub mod output;

use tracing_subscriber::{EnvFilter, fmt};

/// Log filter used when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "info,hypersweep_tools=debug,hypersweep_core=info";

/// Initialize logging with [`DEFAULT_LOG_FILTER`].
///
/// Use `RUST_LOG` environment variable to override the default filter.
/// Default is `debug` for this crate, so every script written is logged,
/// and `info` for `hypersweep_core` and everything else. Raise the core
/// to `debug` to see each derivation and slicing step.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    fmt().with_env_filter(filter).with_target(false).init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_log_filter_parses() {
        assert!(EnvFilter::try_new(DEFAULT_LOG_FILTER).is_ok());
    }
}
