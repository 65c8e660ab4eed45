use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{
    EnvFilter,
    fmt::{self, format::FmtSpan},
};

/// Installs the global subscriber with `info` as the default filter.
pub fn init() {
    init_with_default("info");
}

/// Installs the global subscriber. `RUST_LOG` overrides `default_directive`.
///
/// When the filter lets debug events through, each pipeline stage span also
/// reports its busy time on close. Calling this more than once is harmless.
pub fn init_with_default(default_directive: &str) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    let verbose = env_filter
        .max_level_hint()
        .is_some_and(|level| level >= LevelFilter::DEBUG);

    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_timer(fmt::time::uptime())
        .with_span_events(if verbose { FmtSpan::CLOSE } else { FmtSpan::NONE });

    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init();
}
