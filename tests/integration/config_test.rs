use hostwatch::core::config::{AlertSpec, CheckSpec, JobSpec};
use hostwatch::MonitorConfig;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

#[test]
fn test_config_default() {
    let config = MonitorConfig::default();
    assert!(config.jobs.is_empty());
    assert!(config.alerts.is_empty());
    assert_eq!(config.probe_timeout_secs, 30);
}

#[test]
fn test_config_roundtrip() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("nested").join("config.json");

    let config = MonitorConfig::starter();
    config.save_to(&path).unwrap();

    let loaded = MonitorConfig::load_from(&path).unwrap();
    assert_eq!(loaded, config);
}

#[test]
fn test_empty_file_loads_default() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.json");
    fs::write(&path, "   \n").unwrap();

    assert_eq!(MonitorConfig::load_from(&path).unwrap(), MonitorConfig::default());
}

#[test]
fn test_malformed_file_is_an_error() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.json");
    fs::write(&path, "{ not json").unwrap();

    assert!(MonitorConfig::load_from(&path).is_err());
}

#[test]
fn test_hand_written_config() {
    let json = r#"{
        "alerts": [{ "type": "job_list" }],
        "jobs": [
            { "type": "ping", "host": "gateway" },
            { "type": "file_exists", "path": "/etc/hosts", "name": "hosts file" },
            {
                "type": "scan_logs",
                "file": "/var/log/syslog",
                "text": "oom-killer",
                "since_minutes": 15,
                "alerts": [{ "type": "file", "path": "/tmp/oom.log" }]
            }
        ]
    }"#;
    let config: MonitorConfig = serde_json::from_str(json).unwrap();

    assert_eq!(config.probe_timeout_secs, 30);
    assert_eq!(config.alerts, vec![AlertSpec::JobList]);
    assert_eq!(
        config.jobs[0].check,
        CheckSpec::Ping {
            host: "gateway".to_string(),
            pings: 4,
            threshold: 80.0,
        }
    );
    assert_eq!(config.jobs[1].name.as_deref(), Some("hosts file"));
    assert_eq!(
        config.jobs[2].alerts,
        vec![AlertSpec::File {
            path: PathBuf::from("/tmp/oom.log"),
            timestamps: false,
        }]
    );
}

#[test]
fn test_build_attaches_defaults_and_job_sinks() {
    let temp_dir = TempDir::new().unwrap();
    let shared_log = temp_dir.path().join("all.log");
    let own_log = temp_dir.path().join("own.log");

    let mut with_own = JobSpec::new(CheckSpec::FileExists {
        path: temp_dir.path().join("missing"),
    });
    with_own.alerts.push(AlertSpec::File {
        path: own_log.clone(),
        timestamps: false,
    });

    let config = MonitorConfig {
        probe_timeout_secs: 5,
        alerts: vec![AlertSpec::File {
            path: shared_log.clone(),
            timestamps: false,
        }],
        jobs: vec![
            JobSpec::new(CheckSpec::FileExists {
                path: temp_dir.path().to_path_buf(),
            }),
            with_own,
        ],
    };

    let mut monitor = config.build().unwrap();
    assert_eq!(monitor.jobs().len(), 2);
    assert_eq!(monitor.jobs()[0].sinks().len(), 1);
    assert_eq!(monitor.jobs()[1].sinks().len(), 2);

    let summary = monitor.execute();
    assert_eq!(summary.alerts, 1);
    assert_eq!(summary.sinks_finished, 2);

    let expected = format!("{} Does Not Exist\r\n", temp_dir.path().join("missing").display());
    assert_eq!(fs::read_to_string(&shared_log).unwrap(), expected);
    assert_eq!(fs::read_to_string(&own_log).unwrap(), expected);
}

#[test]
fn test_job_names_follow_config_order() {
    let mut config = MonitorConfig::default();
    config.add_job(CheckSpec::Ping {
        host: "gateway".to_string(),
        pings: 4,
        threshold: 80.0,
    });
    config.add_job(CheckSpec::parse_disk_flag("/:10").unwrap());

    assert_eq!(
        config.job_names().unwrap(),
        vec!["Ping gateway".to_string(), "Check Disk Space /".to_string()]
    );
}

#[test]
fn test_invalid_job_rejected_before_run() {
    let mut config = MonitorConfig::default();
    config.add_job(CheckSpec::Process {
        pattern: "(unclosed".to_string(),
    });
    assert!(config.build().is_err());

    let mut config = MonitorConfig::default();
    config.add_job(CheckSpec::DiskSpace {
        path: PathBuf::from("/"),
        minimum_percent: 150.0,
    });
    assert!(config.build().is_err());
}
