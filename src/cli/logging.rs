//! Diagnostic logging to stderr

use tracing_subscriber::EnvFilter;

use crate::cli::GlobalOpts;

/// Environment variable holding a tracing filter directive
pub const LOG_ENV: &str = "LSS_LOG";

/// Level used when `LSS_LOG` is unset
pub fn default_level(global: &GlobalOpts) -> &'static str {
    if global.verbose {
        "debug"
    } else if global.quiet {
        "warn"
    } else {
        "info"
    }
}

/// Install the global subscriber; a second call is a no-op
pub fn init(global: &GlobalOpts) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(default_level(global)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
