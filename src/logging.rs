use tracing_subscriber::EnvFilter;

/// Initialize tracing for the editor and bridge `log` records into it,
/// since the rest of the crate logs through the `log` macros.
///
/// Safe to call more than once; later calls are no-ops.
pub fn init(verbose: bool) {
    let _ = tracing_log::LogTracer::init();

    // An explicit --verbose beats RUST_LOG; otherwise honor the environment
    // and default to info so export paths show up in the terminal.
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init()
        .ok();

    tracing::debug!("logging initialized");
}
