pub mod config;
pub mod date_utils;
pub mod db;
pub mod error;
pub mod models;
pub mod services;

/// Application version from Cargo.toml (single source of truth)
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Install a `tracing` subscriber reading `RUST_LOG`, defaulting to
/// `fintrack=debug`. Safe to call more than once; later calls are no-ops.
pub fn init_tracing() {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fintrack=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .try_init();
}
