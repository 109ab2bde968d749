use tracing_subscriber::EnvFilter;

/// Installs the global subscriber: `RUST_LOG`-style filtering, `info` by
/// default, human-readable output on stderr so artifacts on stdout stay
/// clean.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
