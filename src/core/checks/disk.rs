//! Free disk space check.

use std::path::PathBuf;

use crate::core::monitor::{AlertDispatch, Check};
use crate::error::WatchError;

use super::probes::{FsStatsProbe, SystemFsStats};

/// Reports free space on every run and alerts when the free share of the
/// filesystem drops below `minimum_percent`.
pub struct DiskSpaceCheck {
    path: PathBuf,
    minimum_percent: f64,
    stats: Box<dyn FsStatsProbe>,
}

impl DiskSpaceCheck {
    pub fn new<P: Into<PathBuf>>(path: P, minimum_percent: f64) -> Self {
        Self {
            path: path.into(),
            minimum_percent,
            stats: Box::new(SystemFsStats),
        }
    }

    pub fn with_stats<S: FsStatsProbe + 'static>(mut self, stats: S) -> Self {
        self.stats = Box::new(stats);
        self
    }
}

impl Check for DiskSpaceCheck {
    fn default_name(&self) -> String {
        format!("Check Disk Space {}", self.path.display())
    }

    fn run(&mut self, dispatch: &mut AlertDispatch) {
        let usage = match self.stats.stats(&self.path) {
            Ok(usage) => usage,
            Err(e) => {
                dispatch.probe_failed(&e);
                return;
            }
        };

        let Some(ratio) = usage.free_ratio() else {
            dispatch.probe_failed(&WatchError::probe(format!(
                "{} reports a zero-sized filesystem",
                self.path.display()
            )));
            return;
        };

        dispatch.update_status(&format!(
            "Space Available: {} MB - {} percent",
            usage.free_bytes() / 1_000_000,
            (ratio * 100.0) as u64
        ));

        if ratio < self.minimum_percent / 100.0 {
            dispatch.log_alert(&format!(
                "Disk Space On {} Is Below Threshold {} percent",
                self.path.display(),
                self.minimum_percent
            ));
        }
    }
}
