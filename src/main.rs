use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use pci_analysis::config::AppConfig;
use pci_analysis::io::csv_write::{self, CsvRecord};
use pci_analysis::model::VisitRow;
use pci_analysis::report;
use pci_analysis::window::{DateWindow, Lookback, Report};
use pci_analysis::{ReportError, Result};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn main() {
    let cli = Cli::parse();
    if let Err(error) = run(cli) {
        eprintln!("error: {error}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    init_logging(&cli.log_level)?;
    let config = AppConfig::load(cli.config.as_deref())?;
    let today = cli.today.unwrap_or_else(|| Local::now().date_naive());

    match cli.command {
        Command::Occupancy(args) => execute_occupancy(args, today, &config),
        Command::Vaccinations(args) => execute_vaccinations(args, today, &config),
        Command::SuggestedBookings(args) => execute_suggested_bookings(args, today, &config),
    }
}

fn init_logging(level: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .map_err(|err| ReportError::Logging(err.to_string()))?;

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .try_init()
        .map_err(|err| ReportError::Logging(err.to_string()))
}

fn execute_occupancy(args: OccupancyArgs, today: NaiveDate, config: &AppConfig) -> Result<()> {
    let window = DateWindow::new(
        args.start.unwrap_or(today),
        args.end.unwrap_or(today),
    )?;
    let occupancy = report::run_occupancy(&args.boarding, &args.daycare, window, config)?;

    if let Some(path) = &args.visits {
        let rows: Vec<VisitRow<'_>> = occupancy.visits.iter().map(VisitRow::from).collect();
        csv_write::write_csv_file(path, &rows)?;
    }
    announce(&occupancy.daily);
    emit(&occupancy.daily.rows, args.output.as_deref())
}

fn execute_vaccinations(args: VaccinationArgs, today: NaiveDate, config: &AppConfig) -> Result<()> {
    let lookback = args.lookback.resolve(config);
    let end = args.end.unwrap_or(today);
    let vaccinations = report::run_vaccinations(&args.input, lookback, end, today, config)?;
    announce(&vaccinations);
    emit(&vaccinations.rows, args.output.as_deref())
}

fn execute_suggested_bookings(
    args: BookingArgs,
    today: NaiveDate,
    config: &AppConfig,
) -> Result<()> {
    let lookback = args.lookback.resolve(config);
    let suggestions =
        report::run_suggested_bookings(&args.boarding, &args.daycare, lookback, today, config)?;
    announce(&suggestions);
    emit(&suggestions.rows, args.output.as_deref())
}

fn announce<T>(report: &Report<T>) {
    if let Some(available) = &report.available {
        eprintln!("Available data from: {available}");
    }
    if let Some(warning) = &report.warning {
        eprintln!("warning: {warning}");
    }
}

fn emit<T: CsvRecord>(rows: &[T], output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => csv_write::write_csv_file(path, rows),
        None => csv_write::write_csv(std::io::stdout().lock(), rows),
    }
}

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Occupancy, vaccination and booking-gap reports from boarding and daycare exports."
)]
struct Cli {
    /// Additional configuration file layered over `pci-analysis.toml`.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Reference day used as "today" (YYYY-MM-DD). Defaults to the local date.
    #[arg(long, global = true)]
    today: Option<NaiveDate>,

    /// Log filter used when `RUST_LOG` is not set.
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Daily headcount from the boarding and daycare exports.
    Occupancy(OccupancyArgs),
    /// Vaccinations expiring inside a lookback window.
    Vaccinations(VaccinationArgs),
    /// Recent clients with no visit booked after today.
    SuggestedBookings(BookingArgs),
}

#[derive(clap::Args)]
struct OccupancyArgs {
    /// "Total Days Boarded" export.
    #[arg(long)]
    boarding: PathBuf,

    /// "Daycare Weekly Report" export.
    #[arg(long)]
    daycare: PathBuf,

    /// First day of the report. Defaults to today.
    #[arg(long)]
    start: Option<NaiveDate>,

    /// Last day of the report. Defaults to today.
    #[arg(long)]
    end: Option<NaiveDate>,

    /// CSV destination. Writes to stdout when omitted.
    #[arg(long)]
    output: Option<PathBuf>,

    /// Also write the merged visit list to this CSV file.
    #[arg(long)]
    visits: Option<PathBuf>,
}

#[derive(clap::Args)]
struct VaccinationArgs {
    /// Expiring-vaccinations export.
    #[arg(long)]
    input: PathBuf,

    #[command(flatten)]
    lookback: LookbackArgs,

    /// Last expiration day to include. Defaults to today.
    #[arg(long)]
    end: Option<NaiveDate>,

    /// CSV destination. Writes to stdout when omitted.
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(clap::Args)]
struct BookingArgs {
    /// "Total Days Boarded" export.
    #[arg(long)]
    boarding: PathBuf,

    /// "Daycare Weekly Report" export.
    #[arg(long)]
    daycare: PathBuf,

    #[command(flatten)]
    lookback: LookbackArgs,

    /// CSV destination. Writes to stdout when omitted.
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(clap::Args)]
struct LookbackArgs {
    /// Look back this many days from today.
    #[arg(long, conflicts_with = "since")]
    lookback_days: Option<u32>,

    /// Look back to this day (YYYY-MM-DD).
    #[arg(long)]
    since: Option<NaiveDate>,
}

impl LookbackArgs {
    fn resolve(&self, config: &AppConfig) -> Lookback {
        match (self.since, self.lookback_days) {
            (Some(date), _) => Lookback::Since(date),
            (None, Some(days)) => Lookback::Days(days),
            (None, None) => Lookback::Days(config.windows.lookback_days),
        }
    }
}
