//! Sink that only cares about which jobs exist.

use std::io::{self, Write};

use crate::core::monitor::AlertSink;
use crate::error::Result;

/// Collects the names of the jobs it is attached to and writes them,
/// space separated, when finished.
pub struct JobListSink<W: Write + Send> {
    jobs: Vec<String>,
    out: W,
}

impl JobListSink<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write + Send> JobListSink<W> {
    pub fn new(out: W) -> Self {
        Self {
            jobs: Vec::new(),
            out,
        }
    }

    pub fn jobs(&self) -> &[String] {
        &self.jobs
    }

    pub fn destination(&self) -> &W {
        &self.out
    }
}

impl<W: Write + Send> AlertSink for JobListSink<W> {
    fn label(&self) -> String {
        "job-list".to_string()
    }

    fn register(&mut self, job_name: &str) {
        self.jobs.push(job_name.to_string());
    }

    fn finish(&mut self) -> Result<()> {
        writeln!(self.out, "{}", self.jobs.join(" "))?;
        self.out.flush()?;
        Ok(())
    }
}
