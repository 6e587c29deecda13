use tracing_subscriber::EnvFilter;

/// Initialize logging, defaulting to `info` unless `RUST_LOG` says otherwise.
///
/// Safe to call more than once, later calls are ignored.
pub fn init_logging() {
    use tracing_subscriber::prelude::*;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_level(true)
                .compact(),
        )
        .try_init();
}
