// Platform-specific code module

pub mod command;
pub mod fs;
pub mod process;

pub use command::{run_with_timeout, CommandOutput};
pub use fs::{fs_usage, FsUsage};
pub use process::process_listing;
