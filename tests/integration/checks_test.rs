use chrono::{NaiveDate, NaiveDateTime};
use hostwatch::core::alerts::WriterSink;
use hostwatch::core::checks::{
    FileExistsCheck, PingCheck, PingProbe, ProcessCheck, ProcessLister, QueryCheck, ScanLogsCheck,
};
use hostwatch::core::monitor::{Check, Job, Monitor, SinkRef};
use hostwatch::{Result, WatchError};
use parking_lot::Mutex;
use std::fs;
use std::sync::Arc;
use tempfile::TempDir;

/// Run `check` as the only job and return what a plain writer sink saw
fn alerts_of<C: Check + 'static>(check: C) -> String {
    let buffer = Arc::new(Mutex::new(WriterSink::new("buffer", Vec::new())));
    let handle: SinkRef = buffer.clone();

    let mut monitor = Monitor::with_default_alert(handle);
    monitor.add_job(Job::new(check));
    monitor.execute();

    let out = String::from_utf8_lossy(buffer.lock().get_ref()).into_owned();
    out
}

fn noon_jan_13() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2010, 1, 13)
        .and_then(|d| d.and_hms_opt(14, 0, 0))
        .unwrap()
}

struct Loss(Option<f64>);

impl PingProbe for Loss {
    fn packet_loss(&self, _host: &str, _count: u32) -> Result<f64> {
        self.0.ok_or_else(|| WatchError::probe("Unable to find ping result"))
    }
}

struct Listing(&'static str);

impl ProcessLister for Listing {
    fn list(&self) -> Result<String> {
        Ok(self.0.to_string())
    }
}

#[test]
fn test_scan_logs_finds_recent_line() {
    let temp_dir = TempDir::new().unwrap();
    let log = temp_dir.path().join("app.log");
    fs::write(
        &log,
        "2010-01-13 13:48:34  Something to find\n2010-01-13 13:50:00  routine\n",
    )
    .unwrap();

    let check = ScanLogsCheck::new(&log, "Something to find")
        .since_minutes(Some(120))
        .with_clock(noon_jan_13);

    assert_eq!(
        alerts_of(check),
        "Found Message In The Logs: \n2010-01-13 13:48:34  Something to find\n"
    );
}

#[test]
fn test_scan_logs_ignores_stale_line() {
    let temp_dir = TempDir::new().unwrap();
    let log = temp_dir.path().join("app.log");
    fs::write(&log, "2010-01-13 09:00:00  Something to find\n").unwrap();

    let check = ScanLogsCheck::new(&log, "Something to find")
        .since_minutes(Some(60))
        .with_clock(noon_jan_13);

    assert_eq!(alerts_of(check), "");
}

#[test]
fn test_scan_logs_term_absent() {
    let temp_dir = TempDir::new().unwrap();
    let log = temp_dir.path().join("app.log");
    fs::write(&log, "2010-01-13 13:48:34  all quiet\n").unwrap();

    assert_eq!(alerts_of(ScanLogsCheck::new(&log, "panic")), "");
}

#[test]
fn test_scan_logs_missing_file_becomes_alert() {
    let temp_dir = TempDir::new().unwrap();
    let missing = temp_dir.path().join("nope.log");

    let out = alerts_of(ScanLogsCheck::new(&missing, "anything"));
    assert!(out.starts_with("Unable to determine result: "));
}

#[test]
fn test_file_exists_message() {
    let temp_dir = TempDir::new().unwrap();
    let missing = temp_dir.path().join("gone.txt");
    let present = temp_dir.path().join("here.txt");
    fs::write(&present, "x").unwrap();

    assert_eq!(
        alerts_of(FileExistsCheck::new(&missing)),
        format!("{} Does Not Exist\n", missing.display())
    );
    assert_eq!(alerts_of(FileExistsCheck::new(&present)), "");
}

#[test]
fn test_ping_messages() {
    assert_eq!(
        alerts_of(PingCheck::new("db01").with_prober(Loss(Some(100.0)))),
        "Host db01 Is Not Responding\n"
    );
    assert_eq!(
        alerts_of(PingCheck::unreachable("db01").with_prober(Loss(Some(0.0)))),
        "Host db01 Is Up and Responding To Pings\n"
    );

    let out = alerts_of(PingCheck::new("db01").with_prober(Loss(None)));
    assert!(out.starts_with("Unable to determine result: "));
    assert!(out.contains("Unable to find ping result"));
}

#[test]
fn test_process_check_messages() {
    let running = ProcessCheck::new("sshd")
        .unwrap()
        .with_lister(Listing("1 init\n812 sshd\n"));
    assert_eq!(alerts_of(running), "");

    let missing = ProcessCheck::new("nginx")
        .unwrap()
        .with_lister(Listing("1 init\n812 sshd\n"));
    assert_eq!(alerts_of(missing), "Process nginx Is Not Running\n");
}

#[test]
fn test_query_check_against_sqlite() {
    let temp_dir = TempDir::new().unwrap();
    let db = temp_dir.path().join("ops.db");
    let conn = rusqlite::Connection::open(&db).unwrap();
    conn.execute_batch(
        "CREATE TABLE queue (id INTEGER PRIMARY KEY, stuck INTEGER);
         INSERT INTO queue (stuck) VALUES (7);",
    )
    .unwrap();
    drop(conn);

    let check = QueryCheck::new("stuck jobs", &db, "SELECT stuck FROM queue");
    assert_eq!(alerts_of(check), "Query stuck jobs returned result: 7\n");
}
