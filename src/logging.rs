//! Tracing setup
//!
//! Events go to stderr so table/JSON output on stdout stays clean.

use std::sync::Once;

use tracing_subscriber::{fmt, EnvFilter};

/// Environment variable holding a tracing filter, e.g. `spendtrack=debug`
pub const LOG_ENV: &str = "SPENDTRACK_LOG";

static TRACING_INIT: Once = Once::new();

/// Filter used when neither `SPENDTRACK_LOG` nor `RUST_LOG` is set
fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        "spendtrack=debug"
    } else {
        "spendtrack=warn"
    }
}

/// Build the filter: `SPENDTRACK_LOG`, then `RUST_LOG`, then the default
pub fn build_filter(verbose: bool) -> EnvFilter {
    std::env::var(LOG_ENV)
        .ok()
        .or_else(|| std::env::var(EnvFilter::DEFAULT_ENV).ok())
        .filter(|directives| !directives.trim().is_empty())
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(default_directive(verbose)))
}

/// Initializes the global tracing subscriber; later calls are no-ops
pub fn init_tracing(verbose: bool) {
    TRACING_INIT.call_once(|| {
        let _ = fmt()
            .with_env_filter(build_filter(verbose))
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    });
}
