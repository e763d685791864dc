//! Tracing subscriber setup for the binary.
//!
//! The library only emits events; installing a subscriber is left to whoever
//! embeds it. The CLI installs a plain fmt subscriber on stderr.

use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter directives.
pub const LOG_ENV: &str = "SOFTSCREEN_LOG";

/// Default filter directives.
#[must_use]
pub const fn default_directives(verbose: bool) -> &'static str {
    if verbose { "softscreen=debug,softscreen_lib=debug" } else { "softscreen=info,softscreen_lib=info" }
}

/// Builds the filter from `SOFTSCREEN_LOG`, falling back to the defaults.
#[must_use]
pub fn env_filter(verbose: bool) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_directives(verbose)))
}

/// Installs the global subscriber. Does nothing if one is already installed.
pub fn init(verbose: bool) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter(verbose))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
