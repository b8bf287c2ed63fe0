use tracing_subscriber::EnvFilter;

/// Initializes the global subscriber: `RUST_LOG` filtering (default `info`), compact lines,
/// no module targets since actor logs carry `entity_type` instead.
///
/// Call once, at the start of `main`.
pub fn setup_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}
