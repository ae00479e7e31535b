//! Path existence check.

use std::path::PathBuf;

use crate::core::monitor::{AlertDispatch, Check};

use super::probes::{PathProbe, SystemPaths};

pub struct FileExistsCheck {
    path: PathBuf,
    probe: Box<dyn PathProbe>,
}

impl FileExistsCheck {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self {
            path: path.into(),
            probe: Box::new(SystemPaths),
        }
    }

    pub fn with_probe<P: PathProbe + 'static>(mut self, probe: P) -> Self {
        self.probe = Box::new(probe);
        self
    }

    pub fn exists(&self) -> bool {
        self.probe.exists(&self.path)
    }
}

impl Check for FileExistsCheck {
    fn default_name(&self) -> String {
        format!("File {} Exists", self.path.display())
    }

    fn run(&mut self, dispatch: &mut AlertDispatch) {
        if !self.exists() {
            dispatch.log_alert(&format!("{} Does Not Exist", self.path.display()));
        }
    }
}
