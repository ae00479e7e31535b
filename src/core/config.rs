use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::core::alerts::{ConsoleSink, EmailSink, FileSink, JobListSink};
use crate::core::checks::{
    DiskSpaceCheck, FileExistsCheck, PingCheck, ProcessCheck, QueryCheck, ScanLogsCheck, SystemPing,
    DEFAULT_LOSS_THRESHOLD, DEFAULT_PINGS,
};
use crate::core::monitor::{shared, Check, Job, Monitor, SinkRef};
use crate::error::WatchError;

fn default_timeout_secs() -> u64 {
    30
}

fn default_pings() -> u32 {
    DEFAULT_PINGS
}

fn default_threshold() -> f64 {
    DEFAULT_LOSS_THRESHOLD
}

/// Everything needed to assemble one monitoring pass
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonitorConfig {
    /// Deadline for each external command, in seconds
    #[serde(default = "default_timeout_secs")]
    pub probe_timeout_secs: u64,
    /// Sinks attached to every job
    #[serde(default)]
    pub alerts: Vec<AlertSpec>,
    #[serde(default)]
    pub jobs: Vec<JobSpec>,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            probe_timeout_secs: default_timeout_secs(),
            alerts: Vec::new(),
            jobs: Vec::new(),
        }
    }
}

/// A sink, as written in the config file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AlertSpec {
    Console {
        #[serde(default)]
        show_status: bool,
    },
    File {
        path: PathBuf,
        #[serde(default)]
        timestamps: bool,
    },
    Email {
        to: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        server: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        from: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        subject: Option<String>,
    },
    JobList,
}

impl AlertSpec {
    /// Create the sink. Opening files and parsing addresses happens here so
    /// misconfiguration surfaces before any job runs.
    pub fn build(&self) -> crate::Result<SinkRef> {
        let sink = match self {
            AlertSpec::Console { show_status } => {
                shared(ConsoleSink::stdout().with_status(*show_status))
            }
            AlertSpec::File { path, timestamps } => shared(FileSink::new(path, *timestamps).map_err(
                |e| WatchError::config(format!("cannot open alert file {}: {}", path.display(), e)),
            )?),
            AlertSpec::Email {
                to,
                server,
                from,
                subject,
            } => {
                let mut sink = EmailSink::new(to)?;
                if let Some(from) = from {
                    sink = sink.with_from(from)?;
                }
                if let Some(server) = server {
                    sink = sink.with_server(server.as_str());
                }
                if let Some(subject) = subject {
                    sink = sink.with_subject(subject.as_str());
                }
                shared(sink)
            }
            AlertSpec::JobList => shared(JobListSink::stdout()),
        };
        Ok(sink)
    }
}

/// What a job checks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CheckSpec {
    Ping {
        host: String,
        #[serde(default = "default_pings")]
        pings: u32,
        #[serde(default = "default_threshold")]
        threshold: f64,
    },
    Unreachable {
        host: String,
        #[serde(default = "default_pings")]
        pings: u32,
    },
    Process {
        pattern: String,
    },
    DiskSpace {
        path: PathBuf,
        minimum_percent: f64,
    },
    FileExists {
        path: PathBuf,
    },
    ScanLogs {
        file: PathBuf,
        text: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        since_minutes: Option<u32>,
    },
    Query {
        name: String,
        database: PathBuf,
        query: String,
    },
}

impl CheckSpec {
    /// Parse `PATH:MINPCT`, e.g. `/var:10`
    pub fn parse_disk_flag(value: &str) -> crate::Result<Self> {
        let (path, percent) = value
            .rsplit_once(':')
            .ok_or_else(|| WatchError::config(format!("expected PATH:MINPCT, got '{}'", value)))?;
        let minimum_percent = percent
            .parse()
            .map_err(|_| WatchError::config(format!("invalid percent '{}' in '{}'", percent, value)))?;
        Ok(CheckSpec::DiskSpace {
            path: PathBuf::from(path),
            minimum_percent,
        })
    }

    /// Parse `FILE:TERM[:MINUTES]`. A trailing segment that is not a number
    /// is part of the term.
    pub fn parse_log_flag(value: &str) -> crate::Result<Self> {
        let (file, rest) = value
            .split_once(':')
            .ok_or_else(|| WatchError::config(format!("expected FILE:TERM[:MINUTES], got '{}'", value)))?;

        let (text, since_minutes) = match rest.rsplit_once(':') {
            Some((term, minutes)) => match minutes.parse::<u32>() {
                Ok(minutes) => (term, Some(minutes)),
                Err(_) => (rest, None),
            },
            None => (rest, None),
        };

        Ok(CheckSpec::ScanLogs {
            file: PathBuf::from(file),
            text: text.to_string(),
            since_minutes,
        })
    }

    fn validate(&self) -> crate::Result<()> {
        let problem = match self {
            CheckSpec::Ping { host, .. } | CheckSpec::Unreachable { host, .. } if host.trim().is_empty() => {
                Some("ping host is empty".to_string())
            }
            CheckSpec::Ping { pings: 0, .. } | CheckSpec::Unreachable { pings: 0, .. } => {
                Some("ping count must be at least 1".to_string())
            }
            CheckSpec::Ping { threshold, .. } if !(0.0..=100.0).contains(threshold) => {
                Some(format!("loss threshold {} is not a percentage", threshold))
            }
            CheckSpec::DiskSpace { minimum_percent, .. } if !(0.0..=100.0).contains(minimum_percent) => {
                Some(format!("minimum percent {} is not a percentage", minimum_percent))
            }
            CheckSpec::ScanLogs { text, .. } if text.is_empty() => Some("log search text is empty".to_string()),
            CheckSpec::Query { query, .. } if query.trim().is_empty() => Some("query is empty".to_string()),
            _ => None,
        };

        match problem {
            Some(problem) => Err(WatchError::config(problem)),
            None => Ok(()),
        }
    }
}

/// One job: a check, an optional name override and job-only sinks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(flatten)]
    pub check: CheckSpec,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub alerts: Vec<AlertSpec>,
}

impl JobSpec {
    pub fn new(check: CheckSpec) -> Self {
        Self {
            name: None,
            check,
            alerts: Vec::new(),
        }
    }

    fn job<C: Check + 'static>(&self, check: C) -> Job {
        match &self.name {
            Some(name) => Job::named(name.as_str(), check),
            None => Job::new(check),
        }
    }

    /// The job without any sinks attached
    pub fn build_bare(&self, timeout: Duration) -> crate::Result<Job> {
        self.check.validate()?;

        let job = match &self.check {
            CheckSpec::Ping {
                host,
                pings,
                threshold,
            } => self.job(
                PingCheck::new(host.as_str())
                    .with_pings(*pings)
                    .with_threshold(*threshold)
                    .with_prober(SystemPing { timeout }),
            ),
            CheckSpec::Unreachable { host, pings } => self.job(
                PingCheck::unreachable(host.as_str())
                    .with_pings(*pings)
                    .with_prober(SystemPing { timeout }),
            ),
            CheckSpec::Process { pattern } => self.job(ProcessCheck::new(pattern.as_str())?),
            CheckSpec::DiskSpace {
                path,
                minimum_percent,
            } => self.job(DiskSpaceCheck::new(path, *minimum_percent)),
            CheckSpec::FileExists { path } => self.job(FileExistsCheck::new(path)),
            CheckSpec::ScanLogs {
                file,
                text,
                since_minutes,
            } => self.job(ScanLogsCheck::new(file, text.as_str()).since_minutes(*since_minutes)),
            CheckSpec::Query {
                name,
                database,
                query,
            } => self.job(QueryCheck::new(name.as_str(), database, query.as_str())),
        };
        Ok(job)
    }

    /// The job with its job-only sinks attached
    pub fn build(&self, timeout: Duration) -> crate::Result<Job> {
        let mut job = self.build_bare(timeout)?;
        for alert in &self.alerts {
            job.add_alert(alert.build()?);
        }
        Ok(job)
    }
}

impl MonitorConfig {
    pub fn load() -> Result<Self> {
        let config_path = Self::default_path()?;

        if !config_path.exists() {
            return Ok(MonitorConfig::default());
        }
        Self::load_from(&config_path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        if data.trim().is_empty() {
            return Ok(MonitorConfig::default());
        }

        serde_json::from_str(&data).with_context(|| format!("Failed to parse config file: {:?}", path))
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {:?}", parent))?;
        }

        let data = serde_json::to_string_pretty(self).with_context(|| "Failed to serialize config")?;

        fs::write(path, data).with_context(|| format!("Failed to write config file: {:?}", path))?;

        Ok(())
    }

    pub fn default_path() -> Result<PathBuf> {
        let config_dir =
            dirs::config_dir().with_context(|| "Could not determine config directory")?;

        Ok(config_dir.join("hostwatch").join("config.json"))
    }

    /// A small config showing every section
    pub fn starter() -> Self {
        Self {
            probe_timeout_secs: default_timeout_secs(),
            alerts: vec![AlertSpec::Console { show_status: false }],
            jobs: vec![
                JobSpec::new(CheckSpec::Ping {
                    host: "localhost".to_string(),
                    pings: DEFAULT_PINGS,
                    threshold: DEFAULT_LOSS_THRESHOLD,
                }),
                JobSpec::new(CheckSpec::DiskSpace {
                    path: PathBuf::from("/"),
                    minimum_percent: 10.0,
                }),
                JobSpec::new(CheckSpec::ScanLogs {
                    file: PathBuf::from("/var/log/syslog"),
                    text: "Out of memory".to_string(),
                    since_minutes: Some(60),
                }),
            ],
        }
    }

    pub fn probe_timeout(&self) -> Duration {
        Duration::from_secs(self.probe_timeout_secs.max(1))
    }

    pub fn add_job(&mut self, check: CheckSpec) {
        self.jobs.push(JobSpec::new(check));
    }

    /// Names the configured jobs will run under
    pub fn job_names(&self) -> crate::Result<Vec<String>> {
        let timeout = self.probe_timeout();
        self.jobs
            .iter()
            .map(|spec| spec.build_bare(timeout).map(|job| job.name().to_string()))
            .collect()
    }

    /// Assemble a monitor: default sinks first, then every job with its own
    /// sinks.
    pub fn build(&self) -> crate::Result<Monitor> {
        let timeout = self.probe_timeout();
        let mut monitor = Monitor::new();

        for alert in &self.alerts {
            monitor.add_alert(alert.build()?);
        }
        for spec in &self.jobs {
            monitor.add_job(spec.build(timeout)?);
        }

        log::debug!(
            "Assembled {} job(s) with {} default sink(s)",
            monitor.jobs().len(),
            monitor.default_alerts().len()
        );
        Ok(monitor)
    }
}
