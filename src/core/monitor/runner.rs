//! Monitor: owns the jobs of a pass and the default sinks.

use serde::Serialize;

use super::job::Job;
use super::sink::{same_sink, SinkFailure, SinkPhase, SinkRef};

/// Outcome of one [`Monitor::execute`] pass
#[derive(Debug, Default, Serialize)]
pub struct RunSummary {
    pub jobs_run: usize,
    pub alerts: usize,
    pub statuses: usize,
    pub sinks_finished: usize,
    pub failures: Vec<SinkFailure>,
}

impl RunSummary {
    /// True when no sink reported an error
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Configures and executes all of the monitoring jobs.
///
/// Every default sink is attached to every job, whichever was added first.
#[derive(Default)]
pub struct Monitor {
    jobs: Vec<Job>,
    alerts: Vec<SinkRef>,
}

impl Monitor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a monitor with one default sink already in place
    pub fn with_default_alert(sink: SinkRef) -> Self {
        let mut monitor = Self::new();
        monitor.add_alert(sink);
        monitor
    }

    /// Attach all current default sinks to `job`, then queue it.
    pub fn add_job(&mut self, mut job: Job) {
        for sink in &self.alerts {
            job.add_alert(sink.clone());
        }
        self.jobs.push(job);
    }

    /// Attach `sink` to every queued job and to every job added later.
    pub fn add_alert(&mut self, sink: SinkRef) {
        for job in &mut self.jobs {
            job.add_alert(sink.clone());
        }
        self.alerts.push(sink);
    }

    pub fn jobs(&self) -> &[Job] {
        &self.jobs
    }

    pub fn default_alerts(&self) -> &[SinkRef] {
        &self.alerts
    }

    /// Every distinct sink reachable from this monitor: defaults first, in
    /// the order they were added, then job-only sinks in job order.
    pub fn all_sinks(&self) -> Vec<SinkRef> {
        let mut sinks: Vec<SinkRef> = Vec::new();
        let candidates = self
            .alerts
            .iter()
            .chain(self.jobs.iter().flat_map(|job| job.sinks().iter()));

        for sink in candidates {
            if !sinks.iter().any(|known| same_sink(known, sink)) {
                sinks.push(sink.clone());
            }
        }
        sinks
    }

    /// Run every job in insertion order, then finish every sink once.
    pub fn execute(&mut self) -> RunSummary {
        let mut summary = RunSummary::default();

        for job in &mut self.jobs {
            job.run();
            let report = job.take_report();
            log::debug!(
                "Job '{}' finished: {} alert(s), {} status update(s)",
                job.name(),
                report.alerts,
                report.statuses
            );
            summary.jobs_run += 1;
            summary.alerts += report.alerts;
            summary.statuses += report.statuses;
            summary.failures.extend(report.failures);
        }

        for sink in self.all_sinks() {
            let mut guard = sink.lock();
            match guard.finish() {
                Ok(()) => summary.sinks_finished += 1,
                Err(e) => {
                    let label = guard.label();
                    log::error!("Sink {} failed to finish: {}", label, e);
                    summary.failures.push(SinkFailure {
                        sink: label,
                        job: None,
                        phase: SinkPhase::Finish,
                        error: e.to_string(),
                    });
                }
            }
        }

        summary
    }
}
