// Core business logic module

pub mod alerts;
pub mod checks;
pub mod config;
pub mod monitor;

// Re-export commonly used items
pub use config::MonitorConfig;
pub use monitor::{Job, Monitor, RunSummary};
