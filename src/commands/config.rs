use anyhow::{Context, Result};
use colored::Colorize;
use std::path::PathBuf;

use crate::commands::load_config;
use crate::core::MonitorConfig;

pub fn execute(matches: &clap::ArgMatches) -> Result<()> {
    match matches.subcommand() {
        Some(("path", _)) => {
            println!("{}", MonitorConfig::default_path()?.display());
            Ok(())
        }
        Some(("init", sub_matches)) => init(sub_matches),
        Some(("show", sub_matches)) => {
            let config = load_config(sub_matches)?;
            println!("{}", serde_json::to_string_pretty(&config)?);
            Ok(())
        }
        _ => {
            println!("Use 'hostwatch config --help' for more information.");
            Ok(())
        }
    }
}

/// Write a starter config, refusing to clobber an existing file unless forced
fn init(matches: &clap::ArgMatches) -> Result<()> {
    let path = match matches.get_one::<String>("config") {
        Some(path) => PathBuf::from(path),
        None => MonitorConfig::default_path()?,
    };

    if path.exists() && !matches.get_flag("force") {
        println!(
            "{}",
            format!("Config already exists at {}", path.display()).yellow()
        );
        println!("{}", "Use --force to overwrite it.".dimmed());
        return Ok(());
    }

    MonitorConfig::starter()
        .save_to(&path)
        .with_context(|| format!("Failed to write starter config to {:?}", path))?;

    println!(
        "{} {}",
        "✓".green(),
        format!("Wrote starter config to {}", path.display()).white()
    );
    Ok(())
}
