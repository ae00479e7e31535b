use anyhow::{Context, Result};
use colored::Colorize;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use crate::commands::load_config;
use crate::core::checks::{DEFAULT_LOSS_THRESHOLD, DEFAULT_PINGS};
use crate::core::config::{AlertSpec, CheckSpec, MonitorConfig};
use crate::core::monitor::RunSummary;

/// Execute one monitoring pass
pub fn execute(matches: &clap::ArgMatches) -> Result<()> {
    let mut config = load_config(matches)?;

    apply_job_flags(&mut config, matches)?;
    apply_alert_flags(&mut config, matches);

    if config.jobs.is_empty() {
        println!("{}", "No jobs configured.".yellow());
        println!();
        println!("{}", "Add jobs on the command line, for example:".white());
        println!("  {}", "hostwatch run --ping example.com --disk /:10".cyan().bold());
        println!("{}", "or create a config file with:".white());
        println!("  {}", "hostwatch config init".cyan().bold());
        return Ok(());
    }

    let mut monitor = config.build().context("Invalid monitor configuration")?;

    let started = Instant::now();
    let summary = monitor.execute();
    let elapsed = started.elapsed();

    if matches.get_flag("json") {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else if !matches.get_flag("quiet") {
        print_summary(&summary, elapsed);
    }

    Ok(())
}

fn apply_job_flags(config: &mut MonitorConfig, matches: &clap::ArgMatches) -> Result<()> {
    for host in strings(matches, "ping") {
        config.add_job(CheckSpec::Ping {
            host,
            pings: DEFAULT_PINGS,
            threshold: DEFAULT_LOSS_THRESHOLD,
        });
    }
    for host in strings(matches, "unreachable") {
        config.add_job(CheckSpec::Unreachable {
            host,
            pings: DEFAULT_PINGS,
        });
    }
    for pattern in strings(matches, "process") {
        config.add_job(CheckSpec::Process { pattern });
    }
    for value in strings(matches, "disk") {
        config.add_job(CheckSpec::parse_disk_flag(&value)?);
    }
    for path in strings(matches, "file") {
        config.add_job(CheckSpec::FileExists {
            path: PathBuf::from(path),
        });
    }
    for value in strings(matches, "log") {
        config.add_job(CheckSpec::parse_log_flag(&value)?);
    }
    if let Some(secs) = matches.get_one::<u64>("timeout") {
        config.probe_timeout_secs = *secs;
    }
    Ok(())
}

fn apply_alert_flags(config: &mut MonitorConfig, matches: &clap::ArgMatches) {
    let quiet = matches.get_flag("quiet") || matches.get_flag("json");
    let verbose = matches.get_flag("verbose");

    let has_console = config
        .alerts
        .iter()
        .any(|a| matches!(a, AlertSpec::Console { .. }));

    if quiet {
        config.alerts.retain(|a| !matches!(a, AlertSpec::Console { .. }));
    } else if !has_console {
        config.alerts.insert(0, AlertSpec::Console { show_status: verbose });
    } else if verbose {
        for alert in &mut config.alerts {
            if let AlertSpec::Console { show_status } = alert {
                *show_status = true;
            }
        }
    }

    if let Some(path) = matches.get_one::<String>("alert-file") {
        config.alerts.push(AlertSpec::File {
            path: PathBuf::from(path),
            timestamps: matches.get_flag("timestamps"),
        });
    }

    if let Some(to) = matches.get_one::<String>("email") {
        config.alerts.push(AlertSpec::Email {
            to: to.clone(),
            server: matches.get_one::<String>("smtp").cloned(),
            from: None,
            subject: None,
        });
    }

    if matches.get_flag("json") {
        // job names would land in front of the JSON summary on stdout
        config.alerts.retain(|a| !matches!(a, AlertSpec::JobList));
    } else if matches.get_flag("list-jobs") {
        config.alerts.push(AlertSpec::JobList);
    }
}

fn strings(matches: &clap::ArgMatches, id: &str) -> Vec<String> {
    matches
        .get_many::<String>(id)
        .map(|values| values.cloned().collect())
        .unwrap_or_default()
}

fn print_summary(summary: &RunSummary, elapsed: Duration) {
    eprintln!();
    eprintln!("{}", "─".repeat(50));
    eprintln!("{}", "Run Summary".white().bold());
    eprintln!("{}", "─".repeat(50));

    eprintln!("{} {}", "Jobs run:".white(), summary.jobs_run.to_string().cyan().bold());

    let alerts = summary.alerts.to_string();
    if summary.alerts > 0 {
        eprintln!("{} {}", "Alerts:".white(), alerts.red().bold());
    } else {
        eprintln!("{} {}", "Alerts:".white(), alerts.green().bold());
    }

    eprintln!(
        "{} {}",
        "Sinks finished:".white(),
        summary.sinks_finished.to_string().cyan()
    );

    if !summary.is_clean() {
        eprintln!(
            "{} {}",
            "Sink failures:".red().bold(),
            summary.failures.len().to_string().red()
        );
        for failure in &summary.failures {
            let job = failure.job.as_deref().unwrap_or("-");
            eprintln!(
                "  {} {} [{}] {}",
                "✗".red(),
                failure.sink.yellow(),
                format!("{} / {}", failure.phase, job).dimmed(),
                failure.error
            );
        }
    }

    eprintln!("{} {:.2?}", "Elapsed:".white(), elapsed);
    eprintln!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::{Arg, ArgAction, Command};

    fn alert_matches(args: &[&str]) -> clap::ArgMatches {
        let flag = |id: &'static str| Arg::new(id).long(id).action(ArgAction::SetTrue);
        let value = |id: &'static str| Arg::new(id).long(id);

        Command::new("run")
            .arg(flag("verbose"))
            .arg(flag("quiet"))
            .arg(flag("json"))
            .arg(flag("timestamps"))
            .arg(flag("list-jobs"))
            .arg(value("alert-file"))
            .arg(value("email"))
            .arg(value("smtp"))
            .try_get_matches_from(std::iter::once("run").chain(args.iter().copied()))
            .unwrap()
    }

    #[test]
    fn test_verbose_turns_on_status_for_configured_console() {
        let mut config = MonitorConfig::starter();
        apply_alert_flags(&mut config, &alert_matches(&["--verbose"]));

        assert_eq!(config.alerts, vec![AlertSpec::Console { show_status: true }]);
    }

    #[test]
    fn test_configured_console_untouched_without_verbose() {
        let mut config = MonitorConfig::starter();
        apply_alert_flags(&mut config, &alert_matches(&[]));

        assert_eq!(config.alerts, vec![AlertSpec::Console { show_status: false }]);
    }

    #[test]
    fn test_console_added_when_missing() {
        let mut config = MonitorConfig::default();
        apply_alert_flags(&mut config, &alert_matches(&["--verbose", "--list-jobs"]));

        assert_eq!(
            config.alerts,
            vec![AlertSpec::Console { show_status: true }, AlertSpec::JobList]
        );
    }

    #[test]
    fn test_json_drops_console_output() {
        let mut config = MonitorConfig::starter();
        apply_alert_flags(&mut config, &alert_matches(&["--json", "--verbose"]));

        assert!(config.alerts.is_empty());
    }

    #[test]
    fn test_json_drops_configured_job_list() {
        let mut config = MonitorConfig::default();
        config.alerts.push(AlertSpec::JobList);
        apply_alert_flags(&mut config, &alert_matches(&["--json"]));

        assert!(config.alerts.is_empty());
    }
}
