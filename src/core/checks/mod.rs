//! Concrete checks run by jobs.
//!
//! Each check performs one probe and maps the answer to at most one alert
//! (the disk check also reports a status line on every run). A probe that
//! fails is reported as an alert rather than aborting the pass.

mod disk;
mod file_exists;
mod ping;
pub mod probes;
mod process;
mod query;
mod scan_logs;

pub use disk::DiskSpaceCheck;
pub use file_exists::FileExistsCheck;
pub use ping::{PingCheck, PingExpectation, DEFAULT_LOSS_THRESHOLD, DEFAULT_PINGS};
pub use probes::{
    FileLogSearch, FsStatsProbe, LogSearch, PathProbe, PingProbe, ProcessLister, SystemFsStats,
    SystemPaths, SystemPing, SystemProcesses, DEFAULT_PROBE_TIMEOUT,
};
pub use process::ProcessCheck;
pub use query::QueryCheck;
pub use scan_logs::ScanLogsCheck;
