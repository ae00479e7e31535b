//! Log scanning check: search a file for a literal term and alert on
//! recent matches.

use chrono::{Local, NaiveDateTime};
use std::path::PathBuf;

use crate::core::monitor::{AlertDispatch, Check, LogWindowScanner};

use super::probes::{FileLogSearch, LogSearch};

fn local_now() -> NaiveDateTime {
    Local::now().naive_local()
}

pub struct ScanLogsCheck {
    file: PathBuf,
    term: String,
    scanner: LogWindowScanner,
    search: Box<dyn LogSearch>,
    clock: fn() -> NaiveDateTime,
}

impl ScanLogsCheck {
    pub fn new<P: Into<PathBuf>, S: Into<String>>(file: P, term: S) -> Self {
        Self {
            file: file.into(),
            term: term.into(),
            scanner: LogWindowScanner::default(),
            search: Box::new(FileLogSearch),
            clock: local_now,
        }
    }

    /// Only count matches stamped within the last `minutes`
    pub fn since_minutes(mut self, minutes: Option<u32>) -> Self {
        self.scanner = LogWindowScanner::new(minutes);
        self
    }

    pub fn with_search<L: LogSearch + 'static>(mut self, search: L) -> Self {
        self.search = Box::new(search);
        self
    }

    /// Override the source of "now" (local wall-clock time by default)
    pub fn with_clock(mut self, clock: fn() -> NaiveDateTime) -> Self {
        self.clock = clock;
        self
    }
}

impl Check for ScanLogsCheck {
    fn default_name(&self) -> String {
        format!("Scan Logs {} - {}", self.file.display(), self.term)
    }

    fn run(&mut self, dispatch: &mut AlertDispatch) {
        let matched = match self.search.search(&self.file, &self.term) {
            Ok(matched) => matched,
            Err(e) => {
                dispatch.probe_failed(&e);
                return;
            }
        };

        if !matched.contains(&self.term) {
            return;
        }

        if self.scanner.is_finding(&matched, (self.clock)()) {
            dispatch.log_alert(&format!("Found Message In The Logs: \n{}", matched));
        } else {
            log::debug!(
                "'{}' found in {} but outside the {:?} minute window",
                self.term,
                self.file.display(),
                self.scanner.lookback_minutes()
            );
        }
    }
}
