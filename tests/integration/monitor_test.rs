use hostwatch::core::alerts::JobListSink;
use hostwatch::core::monitor::{AlertDispatch, AlertSink, Check, Job, Monitor, SinkRef};
use hostwatch::Result;
use parking_lot::Mutex;
use std::sync::Arc;

struct AlwaysAlert;

impl Check for AlwaysAlert {
    fn default_name(&self) -> String {
        "testjob".to_string()
    }

    fn run(&mut self, dispatch: &mut AlertDispatch) {
        dispatch.log_alert("ALERT");
    }
}

#[derive(Default)]
struct MockAlert {
    alerted: bool,
    finished: usize,
}

impl AlertSink for MockAlert {
    fn log_alert(&mut self, _message: &str, _job_name: &str) -> Result<()> {
        self.alerted = true;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.finished += 1;
        Ok(())
    }
}

fn mock() -> (Arc<Mutex<MockAlert>>, SinkRef) {
    let concrete = Arc::new(Mutex::new(MockAlert::default()));
    let handle: SinkRef = concrete.clone();
    (concrete, handle)
}

#[test]
fn test_job_only_sinks_receive_their_alerts() {
    let (first, first_ref) = mock();
    let (second, second_ref) = mock();

    let mut monitor = Monitor::new();
    monitor.add_job(Job::new(AlwaysAlert).with_alert(first_ref));
    monitor.add_job(Job::new(AlwaysAlert).with_alert(second_ref));

    let summary = monitor.execute();

    assert!(first.lock().alerted);
    assert!(second.lock().alerted);
    assert_eq!(summary.jobs_run, 2);
    assert_eq!(summary.alerts, 2);
    assert!(summary.is_clean());
}

#[test]
fn test_every_sink_finished_once() {
    let (default, default_ref) = mock();
    let (own, own_ref) = mock();

    let mut monitor = Monitor::with_default_alert(default_ref);
    monitor.add_job(Job::new(AlwaysAlert).with_alert(own_ref));
    monitor.add_job(Job::named("second", AlwaysAlert));

    let summary = monitor.execute();

    assert_eq!(default.lock().finished, 1);
    assert_eq!(own.lock().finished, 1);
    assert_eq!(summary.sinks_finished, 2);
}

#[test]
fn test_default_sink_added_late_still_sees_earlier_jobs() {
    let (late, late_ref) = mock();

    let mut monitor = Monitor::new();
    monitor.add_job(Job::new(AlwaysAlert));
    monitor.add_alert(late_ref);
    monitor.execute();

    assert!(late.lock().alerted);
}

#[test]
fn test_job_list_prints_registered_job() {
    let list = Arc::new(Mutex::new(JobListSink::new(Vec::new())));
    let handle: SinkRef = list.clone();

    let mut monitor = Monitor::new();
    monitor.add_job(Job::new(AlwaysAlert));
    monitor.add_alert(handle);
    monitor.execute();

    let list = list.lock();
    assert_eq!(String::from_utf8_lossy(list.destination()), "testjob\n");
}
