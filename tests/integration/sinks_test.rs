use hostwatch::core::alerts::{FileSink, WriterSink};
use hostwatch::core::monitor::{
    shared, AlertDispatch, AlertSink, Check, Job, Monitor, SinkPhase, SinkRef,
};
use parking_lot::Mutex;
use std::fs;
use std::sync::Arc;
use tempfile::TempDir;

struct Alerting(&'static str);

impl Check for Alerting {
    fn default_name(&self) -> String {
        format!("alert {}", self.0)
    }

    fn run(&mut self, dispatch: &mut AlertDispatch) {
        dispatch.update_status("checked");
        dispatch.log_alert(self.0);
    }
}

#[test]
fn test_file_sink_through_monitor() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("file1.txt");

    let mut monitor = Monitor::with_default_alert(shared(FileSink::new(&path, false).unwrap()));
    monitor.add_job(Job::new(Alerting("ALERT")));
    let summary = monitor.execute();

    assert!(summary.is_clean());
    assert_eq!(fs::read_to_string(&path).unwrap(), "ALERT\r\n");
}

#[test]
fn test_file_sink_appends_across_runs() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("alerts.log");

    for message in ["one", "two"] {
        let mut monitor = Monitor::with_default_alert(shared(FileSink::new(&path, false).unwrap()));
        monitor.add_job(Job::new(Alerting(message)));
        monitor.execute();
    }

    assert_eq!(fs::read_to_string(&path).unwrap(), "one\r\ntwo\r\n");
}

#[test]
fn test_failing_sink_does_not_starve_the_next() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("closed.log");

    let closed = FileSink::new(&path, false).unwrap();
    let closed: SinkRef = shared(closed);
    closed.lock().finish().unwrap();

    let buffer = Arc::new(Mutex::new(WriterSink::new("buffer", Vec::new())));
    let buffer_ref: SinkRef = buffer.clone();

    let mut monitor = Monitor::new();
    monitor.add_alert(closed);
    monitor.add_alert(buffer_ref);
    monitor.add_job(Job::new(Alerting("ALERT")));
    let summary = monitor.execute();

    assert_eq!(String::from_utf8_lossy(buffer.lock().get_ref()), "ALERT\n");
    assert_eq!(summary.failures.len(), 1);
    assert_eq!(summary.failures[0].phase, SinkPhase::Alert);
    assert_eq!(summary.failures[0].job.as_deref(), Some("alert ALERT"));
}

#[test]
fn test_console_status_lines_only_when_enabled() {
    let quiet = Arc::new(Mutex::new(WriterSink::new("quiet", Vec::new())));
    let chatty = Arc::new(Mutex::new(WriterSink::new("chatty", Vec::new()).with_status(true)));
    let quiet_ref: SinkRef = quiet.clone();
    let chatty_ref: SinkRef = chatty.clone();

    let mut monitor = Monitor::new();
    monitor.add_alert(quiet_ref);
    monitor.add_alert(chatty_ref);
    monitor.add_job(Job::named("disk", Alerting("low")));
    monitor.execute();

    assert_eq!(String::from_utf8_lossy(quiet.lock().get_ref()), "low\n");
    assert_eq!(
        String::from_utf8_lossy(chatty.lock().get_ref()),
        "disk: checked\nlow\n"
    );
}
