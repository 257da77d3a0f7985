//! sauce-e2e CLI - run the storefront scenarios outside `cargo test`.
//!
//! Every selected scenario gets its own Chrome session. The process exits
//! non-zero if any scenario fails, so CI can gate on it directly.

use anyhow::{Context, bail};
use clap::Parser;
use owo_colors::OwoColorize;
use sauce_e2e::harness::run_scenario;
use sauce_e2e::logging::{LogLevel, init_logging};
use sauce_e2e::{E2eConfig, Scenario};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

/// Page-object end-to-end tests for the Sauce Labs demo storefront
#[derive(Parser, Debug)]
#[command(name = "sauce-e2e", version, about)]
struct Cli {
    /// Config file (default: ./sauce-e2e.toml when present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Storefront root URL, overriding the config
    #[arg(long)]
    base_url: Option<String>,

    /// Only run scenarios whose name starts with this (repeatable)
    #[arg(short, long = "scenario", value_name = "NAME")]
    scenarios: Vec<String>,

    /// List scenario names and exit
    #[arg(long)]
    list: bool,

    /// Show the browser window
    #[arg(long)]
    visible: bool,

    /// Enable verbose logging (debug level)
    #[arg(short, long)]
    verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let args = Cli::parse();
    init_logging(LogLevel::from_flags(args.verbose, args.quiet), args.no_color);

    let selected = select(&args.scenarios)?;
    if args.list {
        for scenario in &selected {
            println!("{}", scenario.name());
        }
        return Ok(ExitCode::SUCCESS);
    }

    let mut config = E2eConfig::load(args.config.as_deref()).context("loading configuration")?;
    if let Some(base_url) = args.base_url {
        config.base_url = base_url;
    }
    if args.visible {
        config.headless = false;
    }
    config.validate().context("validating configuration")?;

    let target = config.target();
    let mut failures = 0usize;

    for scenario in &selected {
        let name = scenario.name();
        let started = Instant::now();
        let target = target.clone();
        let scenario = *scenario;

        let result = run_scenario(&config, &name, |page| async move {
            scenario.run(&page, &target).await
        })
        .await;

        let elapsed = started.elapsed();
        match result {
            Ok(()) => report(args.no_color, true, &format!("{name} ({elapsed:.1?})")),
            Err(e) => {
                failures += 1;
                report(args.no_color, false, &format!("{name} ({elapsed:.1?}): {e}"));
            }
        }
    }

    eprintln!(
        "\n{} passed, {} failed",
        selected.len() - failures,
        failures
    );

    Ok(if failures == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// Scenarios whose name starts with any filter; all of them without filters.
fn select(filters: &[String]) -> anyhow::Result<Vec<Scenario>> {
    let all = Scenario::all();
    if filters.is_empty() {
        return Ok(all);
    }

    for filter in filters {
        if !all.iter().any(|s| s.name().starts_with(filter.as_str())) {
            bail!("no scenario matches '{filter}' (try --list)");
        }
    }

    Ok(all
        .into_iter()
        .filter(|s| filters.iter().any(|f| s.name().starts_with(f.as_str())))
        .collect())
}

fn report(no_color: bool, passed: bool, message: &str) {
    match (passed, no_color) {
        (true, true) => eprintln!("PASS {message}"),
        (false, true) => eprintln!("FAIL {message}"),
        (true, false) => eprintln!("{} {message}", "PASS".green().bold()),
        (false, false) => eprintln!("{} {message}", "FAIL".red().bold()),
    }
}
