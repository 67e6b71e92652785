//! Tally - restaurant back-office reporting
//!
//! Reads dine-in, delivery and cost records exported as JSON arrays and
//! prints daily rollups, monthly rollups or a period summary as JSON.
//!
//! ## Usage
//!
//! ```bash
//! # Daily rollups for March 2025
//! tally daily --year 2025 --month 3 \
//!     --dine-in dine-in.json --delivery delivery.json --cost costs.json
//!
//! # Monthly rollups for 2025
//! tally monthly --year 2025 --dine-in dine-in.json --cost costs.json
//!
//! # Headline figures for a year or a month
//! tally summary --year 2025 --month 3 --dine-in dine-in.json
//!
//! # With verbose logging and a custom config
//! tally -v --config ./tally.yaml monthly --year 2025 --dine-in dine-in.json
//! ```

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use tally_config::DashboardConfig;
use tally_core::{LogGuard, init_logging};
use tally_report::{
    CostBreakdown, CostRecord, DailyRollupBuilder, DateFilter, MonthlyRollupBuilder,
    PeriodSummary, RecordParser, SalesRecord, YearlyTotals,
};
use tracing::{debug, error, info};

/// Tally back-office reporting
///
/// Turns exported sales and cost records into daily and monthly
/// rollups, best sellers and peak hours.
#[derive(Parser, Debug)]
#[command(name = "tally")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose logging (increases log level)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Directory for log files (defaults to ~/.tally/logs/)
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,

    /// Config file (defaults to ~/.tally/config.yaml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// One rollup per active day of a month, newest first
    Daily {
        #[arg(long)]
        year: i32,

        /// Calendar month, 1-12
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..=12))]
        month: u32,

        #[command(flatten)]
        inputs: Inputs,
    },

    /// One rollup per active month of a year, newest first
    Monthly {
        #[arg(long)]
        year: i32,

        #[command(flatten)]
        inputs: Inputs,
    },

    /// Headline totals for a year, or for one month of it
    Summary {
        #[arg(long)]
        year: i32,

        /// Calendar month, 1-12
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..=12))]
        month: Option<u32>,

        #[command(flatten)]
        inputs: Inputs,
    },
}

/// Input files. A missing option means an empty collection.
#[derive(Args, Debug)]
struct Inputs {
    /// JSON array of dine-in sales records
    #[arg(long)]
    dine_in: Option<PathBuf>,

    /// JSON array of delivery sales records
    #[arg(long)]
    delivery: Option<PathBuf>,

    /// JSON array of cost records
    #[arg(long)]
    cost: Option<PathBuf>,
}

/// Records loaded from the input files.
struct Sources {
    dine_in: Vec<SalesRecord>,
    delivery: Vec<SalesRecord>,
    cost: Vec<CostRecord>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct MonthSummary {
    year: i32,
    month: u32,
    month_name: String,
    summary: PeriodSummary,
    cost_breakdown: CostBreakdown,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct YearSummary {
    summary: PeriodSummary,
    totals: YearlyTotals,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let _guard = match setup_logging(&cli) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {}", e);
            return ExitCode::from(1);
        }
    };

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("tally failed: {:#}", e);
            eprintln!("Error: {:#}", e);
            if let Some(hint) = hint_for(&e) {
                eprintln!("Hint: {}", hint);
            }
            ExitCode::from(1)
        }
    }
}

/// Extra line shown under the error: config guidance, or a plain-language
/// description of an input file problem.
fn hint_for(err: &anyhow::Error) -> Option<String> {
    if let Some(e) = err.downcast_ref::<tally_core::TallyError>() {
        return e.guidance().map(str::to_string);
    }
    err.downcast_ref::<tally_report::ReportError>()
        .map(|e| e.friendly_message())
}

/// Set up logging based on CLI arguments.
fn setup_logging(cli: &Cli) -> tally_core::Result<LogGuard> {
    init_logging(cli.log_dir.clone(), cli.verbose > 0)
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let config = DashboardConfig::load_or_default(cli.config.as_deref())?;
    let parser = config.record_parser();
    let options = config.rollup_options();
    let locale = config.locale_table();

    match &cli.command {
        Command::Daily {
            year,
            month,
            inputs,
        } => {
            let src = load_sources(&parser, inputs)?;
            info!(year, month, "building daily rollups");
            let days = DailyRollupBuilder::new(&src.dine_in, &src.delivery, &src.cost)
                .with_options(options)
                .with_locale(locale)
                .build(month - 1, *year);
            print_json(&days)
        }
        Command::Monthly { year, inputs } => {
            let src = load_sources(&parser, inputs)?;
            info!(year, "building monthly rollups");
            let months = MonthlyRollupBuilder::new(&src.dine_in, &src.delivery, &src.cost)
                .with_options(options)
                .with_locale(locale)
                .build(*year);
            print_json(&months)
        }
        Command::Summary {
            year,
            month: Some(month),
            inputs,
        } => {
            let src = load_sources(&parser, inputs)?;
            let month0 = month - 1;
            info!(year, month, "building month summary");
            let days = DailyRollupBuilder::new(&src.dine_in, &src.delivery, &src.cost)
                .with_options(options)
                .with_locale(locale.clone())
                .build(month0, *year);
            let costs = DateFilter::dated(&src.cost).by_month(month0, *year);
            print_json(&MonthSummary {
                year: *year,
                month: *month,
                month_name: locale.month_name(month0),
                summary: PeriodSummary::from_rollups(&days),
                cost_breakdown: CostBreakdown::from_records(&costs),
            })
        }
        Command::Summary {
            year,
            month: None,
            inputs,
        } => {
            let src = load_sources(&parser, inputs)?;
            info!(year, "building year summary");
            let months = MonthlyRollupBuilder::new(&src.dine_in, &src.delivery, &src.cost)
                .with_options(options)
                .with_locale(locale)
                .build(*year);
            print_json(&YearSummary {
                summary: PeriodSummary::from_rollups(&months),
                totals: YearlyTotals::compute(&src.dine_in, &src.delivery, &src.cost, *year),
            })
        }
    }
}

fn load_sources(parser: &RecordParser, inputs: &Inputs) -> anyhow::Result<Sources> {
    let sources = Sources {
        dine_in: load_sales(parser, inputs.dine_in.as_deref())?,
        delivery: load_sales(parser, inputs.delivery.as_deref())?,
        cost: match inputs.cost.as_deref() {
            Some(path) => parser
                .parse_costs_file(path)
                .with_context(|| format!("loading cost records from {}", path.display()))?,
            None => Vec::new(),
        },
    };
    debug!(
        dine_in = sources.dine_in.len(),
        delivery = sources.delivery.len(),
        cost = sources.cost.len(),
        "loaded input records"
    );
    Ok(sources)
}

fn load_sales(parser: &RecordParser, path: Option<&Path>) -> anyhow::Result<Vec<SalesRecord>> {
    match path {
        Some(path) => parser
            .parse_sales_file(path)
            .with_context(|| format!("loading sales records from {}", path.display())),
        None => Ok(Vec::new()),
    }
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let text = serde_json::to_string_pretty(value).context("serializing report")?;
    println!("{}", text);
    Ok(())
}
