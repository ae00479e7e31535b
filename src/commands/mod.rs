// Command handlers module
pub mod config;
pub mod jobs;
pub mod run;
pub mod version;

use anyhow::Result;
use std::path::Path;

use crate::core::MonitorConfig;

// Re-exports for cleaner imports
pub use jobs::execute as jobs;
pub use run::execute as run;
pub use version::execute as version;

/// Config from `--config <path>` when given, else from the default location
pub(crate) fn load_config(matches: &clap::ArgMatches) -> Result<MonitorConfig> {
    match matches.get_one::<String>("config") {
        Some(path) => MonitorConfig::load_from(Path::new(path)),
        None => MonitorConfig::load(),
    }
}
