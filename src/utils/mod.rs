/// Installs the global tracing subscriber.
///
/// `RUST_LOG` wins when set; otherwise the crate logs at `info`. A subscriber
/// that is already installed is left in place.
pub fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("ballot_core=info"));

    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
