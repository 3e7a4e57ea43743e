//! Logger setup for the headless host
//!
//! `RUST_LOG` takes precedence when set. Otherwise this crate logs at info
//! (debug with `--verbose`) and dependencies only report warnings.

use env_logger::{Builder, Env};
use log::LevelFilter;

/// Filter used when `RUST_LOG` is unset
pub fn default_filter(verbose: bool) -> String {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    format!("warn,{}={}", env!("CARGO_CRATE_NAME"), level.as_str().to_lowercase())
}

/// Install the global logger
pub fn init(verbose: bool) {
    let env = Env::default().default_filter_or(default_filter(verbose));
    let mut builder = Builder::from_env(env);
    builder.format_timestamp_millis();

    if builder.try_init().is_err() {
        log::debug!("Logger already installed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter_scopes_crate_level() {
        assert_eq!(default_filter(false), "warn,sky_wars=info");
        assert_eq!(default_filter(true), "warn,sky_wars=debug");
    }

    #[test]
    fn test_init_twice_is_harmless() {
        init(false);
        init(true);
    }
}
