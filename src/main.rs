mod cli;

use anyhow::{Context, Result};
use capgains::config::Config;
use capgains::importers;
use capgains::tax::build_schedule;
use clap::Parser;
use cli::Cli;
use std::io::IsTerminal;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Initialize logging on stderr so stdout stays parseable
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if cli.no_color || !std::io::stdout().is_terminal() {
        colored::control::set_override(false);
    }

    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(fy) = cli.fy {
        config = config.with_start_year(fy);
    }
    let tax_year = config.tax_year().context("Invalid tax year settings")?;

    info!("Reading ledger from {:?}", cli.file);
    let rows = importers::parse_ledger_csv(&cli.file, config.input_delimiter()?)
        .with_context(|| format!("Failed to import ledger {:?}", cli.file))?;

    let report = build_schedule(&rows, &tax_year);

    if cli.json {
        println!("{}", cli::formatters::format_schedule_json(&report));
    } else {
        println!(
            "{}",
            cli::formatters::format_schedule_table(&report, &config.rates)
        );
    }

    Ok(())
}
