// Hostwatch Library - Public API

// Re-export error types
pub mod error;
pub use error::{Result, WatchError};

// Module declarations
pub mod commands;
pub mod core;
pub mod platform;

// Re-export commonly used types
pub use core::config::MonitorConfig;
pub use core::monitor::{AlertSink, Job, Monitor, RunSummary, SinkRef};

/// Initialize logging at `Info`, or `Debug` when `verbose` is set.
/// `RUST_LOG` still wins when present.
pub fn init_logging(verbose: bool) {
    let level = if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    let _ = env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .try_init();
}
