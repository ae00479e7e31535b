//! Alert sink capability.
//!
//! A sink receives alert messages and status updates from any number of
//! jobs and is finalized once at the end of a run. Every operation has a
//! no-op default so concrete sinks only override what they care about.

use parking_lot::Mutex;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;

use crate::error::Result;

/// Receiver of alerts and status updates emitted by jobs.
pub trait AlertSink: Send {
    /// Short label used in logs and failure reports
    fn label(&self) -> String {
        "sink".to_string()
    }

    /// Called once per job the sink gets attached to, before any alert.
    fn register(&mut self, _job_name: &str) {}

    fn log_alert(&mut self, _message: &str, _job_name: &str) -> Result<()> {
        Ok(())
    }

    /// Informational, non-alert updates (e.g. free disk space).
    fn update_status(&mut self, _status: &str, _job_name: &str) -> Result<()> {
        Ok(())
    }

    /// Flush buffered output. The monitor calls this exactly once per run.
    fn finish(&mut self) -> Result<()> {
        Ok(())
    }
}

/// A sink shared between the monitor and any number of jobs.
pub type SinkRef = Arc<Mutex<dyn AlertSink>>;

/// Wrap a concrete sink so it can be attached to jobs.
pub fn shared<S: AlertSink + 'static>(sink: S) -> SinkRef {
    Arc::new(Mutex::new(sink))
}

/// Identity comparison: true when both handles point at the same sink.
pub fn same_sink(a: &SinkRef, b: &SinkRef) -> bool {
    std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b))
}

/// Stage in which a sink reported an error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SinkPhase {
    Alert,
    Status,
    Finish,
}

impl fmt::Display for SinkPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let phase = match self {
            SinkPhase::Alert => "alert",
            SinkPhase::Status => "status",
            SinkPhase::Finish => "finish",
        };
        f.write_str(phase)
    }
}

/// A non-fatal sink error recorded during a run.
#[derive(Debug, Clone, Serialize)]
pub struct SinkFailure {
    pub sink: String,
    pub job: Option<String>,
    pub phase: SinkPhase,
    pub error: String,
}
