use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info,rendermark=debug";

/// Installs the stderr subscriber; stdout stays reserved for command output.
pub(crate) fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_ansi(false)
        .try_init();
}
