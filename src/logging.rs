use tracing_subscriber::{fmt, EnvFilter};

/// Map the `-v` count to a filter directive
pub fn level_for_verbosity(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    }
}

/// Initialize the tracing subscriber, writing to stderr.
///
/// With no `-v`, `RUST_LOG` is honoured and the level defaults to `warn`.
/// An explicit `-v` always wins over the environment.
pub fn init_tracing(verbosity: u8) {
    let default_level = level_for_verbosity(verbosity);
    let filter = if verbosity == 0 {
        EnvFilter::try_from_env("RUST_LOG").unwrap_or_else(|_| EnvFilter::new(default_level))
    } else {
        EnvFilter::new(default_level)
    };

    // try_init: a subscriber may already be installed (e.g. in tests)
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
