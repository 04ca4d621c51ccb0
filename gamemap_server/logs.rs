use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Sets up logging to stdout and to a daily rotating file under `logs/`.
///
/// Levels come from `RUST_LOG`; without it everything logs at `info` and
/// the gamemap crates at `debug`.
pub fn setup_logging() {
    // File appender for daily log rotation
    let file_appender = tracing_appender::rolling::daily("logs", "gamemap.log");
    let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

    // Console layer
    let console_layer = fmt::layer()
        .with_writer(std::io::stdout)
        .with_thread_ids(true)
        .with_target(true);

    // File layer
    let file_layer = fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false)
        .with_thread_ids(true)
        .with_target(true);

    // Default EnvFilter: info for everything, debug for the gamemap crates
    let default_filter = "info,gamemap=debug,gamemap_app=debug,gamemap_gateway=debug,gamemap_web=debug";

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(console_layer)
        .init();

    // The guard flushes the file writer on drop, so it has to outlive main.
    // Leaking it is the simplest way to keep it for the whole process.
    std::mem::forget(guard);
}
