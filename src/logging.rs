//! Diagnostic logging. User-facing output goes through `ui::messages`;
//! this only carries tracing events, always to stderr so that piped
//! output (e.g. `series --json`) stays clean.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// `RUST_LOG` wins; otherwise the configured `log_level` (default "warn").
pub fn init_logging(default_level: &str) {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let subscriber = tracing_subscriber::registry().with(env_filter).with(
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_thread_ids(false)
            .with_file(false)
            .with_line_number(false)
            .compact(),
    );

    // a second init (e.g. in tests) keeps the first subscriber
    let _ = subscriber.try_init();
}
