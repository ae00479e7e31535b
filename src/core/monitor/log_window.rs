//! Time-window filtering over matched log lines.
//!
//! Given the lines a search matched and an optional lookback window, decide
//! whether any of them is recent enough to count as a finding. Timestamps
//! are tried against each [`TimestampGrammar`] in order; the first grammar
//! that yields a date wins. Lines without a usable timestamp are ignored.
//!
//! Everything here is a pure function of (text, lookback, now).

use chrono::{Datelike, Duration, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;

static SYSLOG_STAMP: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b([A-Za-z]{3}) +(\d{1,2}) (\d{2}:\d{2}:\d{2})").expect("valid syslog stamp regex")
});

static ISO_STAMP: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\d{4}-\d{2}-\d{2} \d{2}:\d{2}:\d{2})").expect("valid iso stamp regex")
});

/// Timestamp layouts recognised inside log lines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimestampGrammar {
    /// `Jan 13 07:10:43`; the year is taken from `now`
    Syslog,
    /// `2010-01-13 07:48:34`
    Iso,
}

impl TimestampGrammar {
    /// Grammars in the order they are tried
    pub const ORDERED: [TimestampGrammar; 2] = [TimestampGrammar::Syslog, TimestampGrammar::Iso];

    /// Extract a timestamp from `line`, or `None` when this grammar has no
    /// valid match in it.
    pub fn parse(&self, line: &str, now: NaiveDateTime) -> Option<NaiveDateTime> {
        match self {
            TimestampGrammar::Syslog => SYSLOG_STAMP.captures_iter(line).find_map(|caps| {
                let stamp = format!("{} {} {} {}", now.year(), &caps[1], &caps[2], &caps[3]);
                NaiveDateTime::parse_from_str(&stamp, "%Y %b %d %H:%M:%S").ok()
            }),
            TimestampGrammar::Iso => ISO_STAMP.captures_iter(line).find_map(|caps| {
                NaiveDateTime::parse_from_str(&caps[1], "%Y-%m-%d %H:%M:%S").ok()
            }),
        }
    }
}

/// First timestamp found in `line` by any grammar, in grammar order.
pub fn parse_timestamp(line: &str, now: NaiveDateTime) -> Option<NaiveDateTime> {
    TimestampGrammar::ORDERED
        .iter()
        .find_map(|grammar| grammar.parse(line, now))
}

/// Decides whether matched log text is a finding.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogWindowScanner {
    lookback_minutes: Option<u32>,
}

impl LogWindowScanner {
    /// `None` means any match counts regardless of age.
    pub fn new(lookback_minutes: Option<u32>) -> Self {
        Self { lookback_minutes }
    }

    pub fn lookback_minutes(&self) -> Option<u32> {
        self.lookback_minutes
    }

    /// Empty text is never a finding. With a lookback, at least one line must
    /// carry a timestamp strictly after `now - lookback`.
    pub fn is_finding(&self, matched: &str, now: NaiveDateTime) -> bool {
        if matched.trim().is_empty() {
            return false;
        }

        let Some(minutes) = self.lookback_minutes else {
            return true;
        };

        let threshold = now - Duration::minutes(i64::from(minutes));
        matched
            .lines()
            .filter_map(|line| parse_timestamp(line, now))
            .any(|stamp| stamp > threshold)
    }
}
