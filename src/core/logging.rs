use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Install the global tracing subscriber, writing to stderr.
///
/// `RUST_LOG` takes precedence; `default_directives` applies otherwise
/// (e.g. `"lorebook=info"`). Panics if a subscriber is already installed,
/// so call it once from the binary entrypoint.
pub fn init(default_directives: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}
