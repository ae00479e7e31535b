use anyhow::{Context, Result};
use colored::Colorize;

use crate::commands::load_config;

/// List the jobs a `run` would execute, in execution order
pub fn execute(matches: &clap::ArgMatches) -> Result<()> {
    let config = load_config(matches)?;
    let names = config.job_names().context("Invalid job configuration")?;

    if names.is_empty() {
        println!("{}", "No jobs configured. Use 'hostwatch config init' to create a starter config.".yellow());
        return Ok(());
    }

    println!("{}", "Configured jobs:".white().bold());
    for (idx, name) in names.iter().enumerate() {
        println!("  {}. {}", idx + 1, name.cyan());
    }

    Ok(())
}
