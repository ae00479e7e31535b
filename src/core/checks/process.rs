//! Process presence check.

use regex::Regex;

use crate::core::monitor::{AlertDispatch, Check};
use crate::error::Result;

use super::probes::{ProcessLister, SystemProcesses};

/// Alerts when no running process matches a pattern.
pub struct ProcessCheck {
    pattern: String,
    matcher: Regex,
    lister: Box<dyn ProcessLister>,
}

impl ProcessCheck {
    /// `pattern` is a regular expression searched in the process listing
    pub fn new<S: Into<String>>(pattern: S) -> Result<Self> {
        let pattern = pattern.into();
        let matcher = Regex::new(&pattern)?;
        Ok(Self {
            pattern,
            matcher,
            lister: Box::new(SystemProcesses),
        })
    }

    pub fn with_lister<L: ProcessLister + 'static>(mut self, lister: L) -> Self {
        self.lister = Box::new(lister);
        self
    }
}

impl Check for ProcessCheck {
    fn default_name(&self) -> String {
        format!("Check Process {}", self.pattern)
    }

    fn run(&mut self, dispatch: &mut AlertDispatch) {
        match self.lister.list() {
            Ok(listing) if self.matcher.is_match(&listing) => {}
            Ok(_) => dispatch.log_alert(&format!("Process {} Is Not Running", self.pattern)),
            Err(e) => dispatch.probe_failed(&e),
        }
    }
}
