use anyhow::Result;
use clap::{value_parser, Arg, ArgAction, Command};

use hostwatch::commands;

fn cli() -> Command {
    Command::new("hostwatch")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Run host monitoring checks and route their alerts")
        .disable_version_flag(true)
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Debug logging; also echoes status updates to the console")
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("PATH")
                .help("Config file to use instead of the default location")
                .global(true),
        )
        .subcommand(
            Command::new("run")
                .about("Execute every configured job once")
                .arg(
                    Arg::new("ping")
                        .long("ping")
                        .value_name("HOST")
                        .help("Alert when HOST stops answering pings")
                        .action(ArgAction::Append),
                )
                .arg(
                    Arg::new("unreachable")
                        .long("unreachable")
                        .value_name("HOST")
                        .help("Alert when HOST answers pings")
                        .action(ArgAction::Append),
                )
                .arg(
                    Arg::new("process")
                        .long("process")
                        .value_name("PATTERN")
                        .help("Alert when no process matches PATTERN")
                        .action(ArgAction::Append),
                )
                .arg(
                    Arg::new("disk")
                        .long("disk")
                        .value_name("PATH:MINPCT")
                        .help("Alert when free space on PATH falls below MINPCT percent")
                        .action(ArgAction::Append),
                )
                .arg(
                    Arg::new("file")
                        .long("file")
                        .value_name("PATH")
                        .help("Alert when PATH does not exist")
                        .action(ArgAction::Append),
                )
                .arg(
                    Arg::new("log")
                        .long("log")
                        .value_name("FILE:TERM[:MINUTES]")
                        .help("Alert when TERM appears in FILE, optionally only within the last MINUTES")
                        .action(ArgAction::Append),
                )
                .arg(
                    Arg::new("timeout")
                        .long("timeout")
                        .value_name("SECS")
                        .help("Deadline for each external command")
                        .value_parser(value_parser!(u64)),
                )
                .arg(
                    Arg::new("alert-file")
                        .long("alert-file")
                        .value_name("PATH")
                        .help("Also append alerts to PATH"),
                )
                .arg(
                    Arg::new("timestamps")
                        .long("timestamps")
                        .help("Prefix lines in --alert-file with the local time")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("email")
                        .long("email")
                        .value_name("ADDRESS")
                        .help("Mail all alerts of the run to ADDRESS"),
                )
                .arg(
                    Arg::new("smtp")
                        .long("smtp")
                        .value_name("HOST[:PORT]")
                        .help("SMTP relay for --email (default: localhost)"),
                )
                .arg(
                    Arg::new("list-jobs")
                        .long("list-jobs")
                        .help("Print the names of all jobs at the end of the run")
                        .conflicts_with("json")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("quiet")
                        .short('q')
                        .long("quiet")
                        .help("No console alerts and no summary")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("json")
                        .long("json")
                        .help("Print the run summary as JSON instead of console alerts")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(Command::new("jobs").about("List configured jobs in execution order"))
        .subcommand(
            Command::new("config")
                .about("Manage the config file")
                .subcommand(Command::new("path").about("Print the default config location"))
                .subcommand(
                    Command::new("init")
                        .about("Write a starter config")
                        .arg(
                            Arg::new("force")
                                .short('f')
                                .long("force")
                                .help("Overwrite an existing file")
                                .action(ArgAction::SetTrue),
                        ),
                )
                .subcommand(Command::new("show").about("Print the effective config as JSON")),
        )
        .subcommand(Command::new("version").about("Shows version information"))
}

fn main() -> Result<()> {
    let matches = cli().get_matches();

    hostwatch::init_logging(matches.get_flag("verbose"));

    match matches.subcommand() {
        Some(("run", sub_matches)) => commands::run(sub_matches),
        Some(("jobs", sub_matches)) => commands::jobs(sub_matches),
        Some(("config", sub_matches)) => commands::config::execute(sub_matches),
        Some(("version", _)) => commands::version(),
        _ => {
            println!("Use 'hostwatch --help' for more information.");
            Ok(())
        }
    }
}
