//! Narrow interfaces to the outside world used by the checks.
//!
//! Each check talks to the host through one of these traits so it can be
//! exercised with an in-memory fake. The `System*` types are the real
//! implementations.

use once_cell::sync::Lazy;
use regex::Regex;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::time::Duration;

use crate::error::{Result, WatchError};
use crate::platform::{self, FsUsage};

/// Default deadline for any external command
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(30);

static PACKET_LOSS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d+(?:\.\d+)?)% packet loss").expect("valid packet loss regex"));

/// Sends `count` echo requests and reports the loss percentage.
pub trait PingProbe: Send {
    fn packet_loss(&self, host: &str, count: u32) -> Result<f64>;
}

/// Raw text of the running processes, one per line.
pub trait ProcessLister: Send {
    fn list(&self) -> Result<String>;
}

pub trait FsStatsProbe: Send {
    fn stats(&self, path: &Path) -> Result<FsUsage>;
}

pub trait PathProbe: Send {
    fn exists(&self, path: &Path) -> bool;
}

/// Lines of `file` containing `term` literally, joined by `\n`.
/// Empty when nothing matched.
pub trait LogSearch: Send {
    fn search(&self, file: &Path, term: &str) -> Result<String>;
}

/// Pull the loss figure out of `ping` output.
pub fn parse_packet_loss(output: &str) -> Option<f64> {
    PACKET_LOSS
        .captures(output)
        .and_then(|caps| caps[1].parse().ok())
}

/// `ping -c <count> <host>`
#[derive(Debug, Clone)]
pub struct SystemPing {
    pub timeout: Duration,
}

impl Default for SystemPing {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_PROBE_TIMEOUT,
        }
    }
}

impl PingProbe for SystemPing {
    fn packet_loss(&self, host: &str, count: u32) -> Result<f64> {
        let count = count.to_string();
        let output =
            platform::run_with_timeout("ping", &["-c", count.as_str(), host], self.timeout)?;

        // ping exits non-zero on loss, which is still a valid answer
        parse_packet_loss(&output.stdout)
            .ok_or_else(|| WatchError::probe("Unable to find ping result"))
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemProcesses;

impl ProcessLister for SystemProcesses {
    fn list(&self) -> Result<String> {
        Ok(platform::process_listing())
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemFsStats;

impl FsStatsProbe for SystemFsStats {
    fn stats(&self, path: &Path) -> Result<FsUsage> {
        platform::fs_usage(path)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemPaths;

impl PathProbe for SystemPaths {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }
}

/// Streams the file line by line; invalid UTF-8 is replaced rather than
/// rejected. Only matching lines are kept in memory.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileLogSearch;

impl LogSearch for FileLogSearch {
    fn search(&self, file: &Path, term: &str) -> Result<String> {
        let unreadable =
            |e: std::io::Error| WatchError::probe(format!("cannot read {}: {}", file.display(), e));

        let mut reader = BufReader::new(File::open(file).map_err(unreadable)?);
        let mut buf = Vec::new();
        let mut found: Vec<String> = Vec::new();

        loop {
            buf.clear();
            if reader.read_until(b'\n', &mut buf).map_err(unreadable)? == 0 {
                break;
            }
            let line = String::from_utf8_lossy(&buf);
            let line = line.trim_end_matches(['\n', '\r']);
            if line.contains(term) {
                found.push(line.to_string());
            }
        }

        Ok(found.join("\n"))
    }
}
