use tracing_subscriber::{fmt, EnvFilter};

/// Console logging to stderr, keeping stdout free for command output.
/// `RUST_LOG` takes precedence over `level`.
pub fn setup_console_logging(level: &str) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let _ = fmt()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_env_filter(env_filter)
        .try_init();
}
