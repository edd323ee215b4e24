//! Structured diagnostics via `tracing`.
//!
//! Events go to stderr through a `tracing-subscriber` fmt layer. The filter comes from
//! `AIFO_FLOW_LOG` (EnvFilter syntax, e.g. `aifo_flow=debug`) and defaults to `warn`, so a
//! normal run prints nothing beyond the container's own output.

use once_cell::sync::OnceCell;
use tracing_subscriber::EnvFilter;

static INIT: OnceCell<()> = OnceCell::new();

pub const LOG_ENV: &str = "AIFO_FLOW_LOG";

fn env_filter() -> EnvFilter {
    match std::env::var(LOG_ENV) {
        Ok(v) if !v.trim().is_empty() => {
            EnvFilter::try_new(v.trim()).unwrap_or_else(|_| EnvFilter::new("warn"))
        }
        _ => EnvFilter::new("warn"),
    }
}

/// Install the global subscriber once. Later calls, or a subscriber installed by an
/// embedding application, are left alone.
pub fn telemetry_init() {
    INIT.get_or_init(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(env_filter())
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    });
}
