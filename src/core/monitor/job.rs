//! Jobs and the per-job alert fan-out.

use crate::error::WatchError;

use super::sink::{SinkFailure, SinkPhase, SinkRef};

/// The check a job performs when it runs.
///
/// Implementations probe something external and report through the
/// [`AlertDispatch`] they are handed: zero or more alerts, zero or more
/// status updates.
pub trait Check: Send {
    /// Name used for the job when none is given explicitly
    fn default_name(&self) -> String;

    fn run(&mut self, dispatch: &mut AlertDispatch);
}

/// Ordered list of sinks attached to one job, plus what happened while
/// broadcasting to them.
pub struct AlertDispatch {
    job_name: String,
    sinks: Vec<SinkRef>,
    alerts: usize,
    statuses: usize,
    failures: Vec<SinkFailure>,
}

/// Counters drained from a dispatch after a job ran.
#[derive(Debug, Default)]
pub struct DispatchReport {
    pub alerts: usize,
    pub statuses: usize,
    pub failures: Vec<SinkFailure>,
}

impl AlertDispatch {
    pub fn new<S: Into<String>>(job_name: S) -> Self {
        Self {
            job_name: job_name.into(),
            sinks: Vec::new(),
            alerts: 0,
            statuses: 0,
            failures: Vec::new(),
        }
    }

    pub fn job_name(&self) -> &str {
        &self.job_name
    }

    pub fn sinks(&self) -> &[SinkRef] {
        &self.sinks
    }

    /// Attach a sink and tell it about this job.
    pub fn add_alert(&mut self, sink: SinkRef) {
        sink.lock().register(&self.job_name);
        self.sinks.push(sink);
    }

    /// Broadcast an alert to every sink, in attachment order.
    ///
    /// A failing sink is recorded and skipped; the remaining sinks are
    /// still notified.
    pub fn log_alert(&mut self, message: &str) {
        self.alerts += 1;
        for sink in &self.sinks {
            let mut guard = sink.lock();
            if let Err(e) = guard.log_alert(message, &self.job_name) {
                let label = guard.label();
                log::error!("Sink {} failed to record alert for '{}': {}", label, self.job_name, e);
                self.failures.push(SinkFailure {
                    sink: label,
                    job: Some(self.job_name.clone()),
                    phase: SinkPhase::Alert,
                    error: e.to_string(),
                });
            }
        }
    }

    pub fn update_status(&mut self, status: &str) {
        self.statuses += 1;
        for sink in &self.sinks {
            let mut guard = sink.lock();
            if let Err(e) = guard.update_status(status, &self.job_name) {
                let label = guard.label();
                log::error!("Sink {} failed to record status for '{}': {}", label, self.job_name, e);
                self.failures.push(SinkFailure {
                    sink: label,
                    job: Some(self.job_name.clone()),
                    phase: SinkPhase::Status,
                    error: e.to_string(),
                });
            }
        }
    }

    /// Report a probe that could not produce a result as an alert.
    pub fn probe_failed(&mut self, err: &WatchError) {
        log::warn!("Job '{}' could not complete its probe: {}", self.job_name, err);
        self.log_alert(&format!("Unable to determine result: {}", err));
    }

    pub fn take_report(&mut self) -> DispatchReport {
        DispatchReport {
            alerts: std::mem::take(&mut self.alerts),
            statuses: std::mem::take(&mut self.statuses),
            failures: std::mem::take(&mut self.failures),
        }
    }
}

/// A named check together with the sinks it reports to.
pub struct Job {
    dispatch: AlertDispatch,
    check: Box<dyn Check>,
}

impl Job {
    /// Create a job named after its check
    pub fn new<C: Check + 'static>(check: C) -> Self {
        let name = check.default_name();
        Self::named(name, check)
    }

    /// Create a job with an explicit name
    pub fn named<S: Into<String>, C: Check + 'static>(name: S, check: C) -> Self {
        Self {
            dispatch: AlertDispatch::new(name),
            check: Box::new(check),
        }
    }

    /// Builder form of [`Job::add_alert`] for job-specific sinks.
    pub fn with_alert(mut self, sink: SinkRef) -> Self {
        self.add_alert(sink);
        self
    }

    pub fn name(&self) -> &str {
        self.dispatch.job_name()
    }

    pub fn sinks(&self) -> &[SinkRef] {
        self.dispatch.sinks()
    }

    pub fn add_alert(&mut self, sink: SinkRef) {
        self.dispatch.add_alert(sink);
    }

    pub fn log_alert(&mut self, message: &str) {
        self.dispatch.log_alert(message);
    }

    pub fn update_status(&mut self, status: &str) {
        self.dispatch.update_status(status);
    }

    /// Run the check once. A job with no sinks runs but reports nowhere.
    pub fn run(&mut self) {
        log::debug!("Running job '{}'", self.dispatch.job_name());
        self.check.run(&mut self.dispatch);
    }

    pub fn take_report(&mut self) -> DispatchReport {
        self.dispatch.take_report()
    }
}

impl std::fmt::Debug for Job {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Job")
            .field("name", &self.name())
            .field("sinks", &self.sinks().len())
            .finish()
    }
}
