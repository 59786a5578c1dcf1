use std::path::Path;

use chrono::NaiveDate;
use tracing::{info, instrument, warn};

use crate::pci::analysis::aggregate::{aggregate_data, filter_window, merge_visits};
use crate::pci::analysis::boarding::parse_boarding;
use crate::pci::analysis::bookings;
use crate::pci::analysis::config::AppConfig;
use crate::pci::analysis::daycare::parse_daycare;
use crate::pci::analysis::error::Result;
use crate::pci::analysis::io::excel_read;
use crate::pci::analysis::model::{
    ClientBookingSummary, DailyAggregate, VaccinationRecord, VaccinationSummary, VisitDayRecord,
};
use crate::pci::analysis::vaccination::{read_vaccinations, summarize};
use crate::pci::analysis::window::{AvailableRange, DateWindow, Lookback, Report, ReportWarning};

/// Occupancy for a date window together with the merged visit list it was
/// derived from.
#[derive(Debug, Clone, PartialEq)]
pub struct OccupancyReport {
    pub visits: Vec<VisitDayRecord>,
    pub daily: Report<DailyAggregate>,
}

/// Builds the occupancy report from already parsed visits.
///
/// Nothing is computed when `window` reaches outside the dates present in the
/// visits.
pub fn occupancy(
    boarding: Vec<VisitDayRecord>,
    daycare: Vec<VisitDayRecord>,
    window: DateWindow,
) -> OccupancyReport {
    let (visits, aggregates) = aggregate_data(boarding, daycare);
    let available = AvailableRange::from_dates(visits.iter().map(|visit| visit.date));

    let daily = match available {
        None => Report::withheld(None, ReportWarning::NoData),
        Some(range) if !range.covers(&window) => Report::withheld(
            Some(range),
            ReportWarning::OutsideAvailableRange {
                requested: window,
                available: range,
            },
        ),
        Some(range) => Report::computed(filter_window(&aggregates, &window), Some(range)),
    };

    OccupancyReport { visits, daily }
}

/// Lists clients seen between `lookback_date` and `today` who have no visit
/// booked after `today`.
pub fn suggested_bookings(
    boarding: Vec<VisitDayRecord>,
    daycare: Vec<VisitDayRecord>,
    lookback_date: NaiveDate,
    today: NaiveDate,
) -> Result<Report<ClientBookingSummary>> {
    let requested = DateWindow::new(lookback_date, today)?;
    let visits = merge_visits(boarding, daycare);
    let available = AvailableRange::from_dates(visits.iter().map(|visit| visit.date));

    Ok(match available {
        None => Report::withheld(None, ReportWarning::NoData),
        Some(range) if lookback_date < range.first => Report::withheld(
            Some(range),
            ReportWarning::OutsideAvailableRange {
                requested,
                available: range,
            },
        ),
        Some(range) => Report::computed(
            bookings::suggested_bookings(&visits, today, lookback_date),
            Some(range),
        ),
    })
}

/// Summarises the vaccinations expiring inside `window`.
pub fn vaccinations(records: &[VaccinationRecord], window: DateWindow) -> Report<VaccinationSummary> {
    let available =
        AvailableRange::from_dates(records.iter().filter_map(|record| record.expiration_date));
    match available {
        None => Report::withheld(None, ReportWarning::NoData),
        Some(range) => Report::computed(summarize(records, &window), Some(range)),
    }
}

/// Reads both booking exports and builds the occupancy report.
#[instrument(
    level = "info",
    skip_all,
    fields(boarding = %boarding.display(), daycare = %daycare.display(), %window)
)]
pub fn run_occupancy(
    boarding: &Path,
    daycare: &Path,
    window: DateWindow,
    config: &AppConfig,
) -> Result<OccupancyReport> {
    let boarding = parse_boarding(excel_read::read_table(boarding)?, &config.boarding)?;
    let daycare = parse_daycare(excel_read::read_table(daycare)?, &config.daycare)?;
    info!(
        boarding_days = boarding.len(),
        daycare_visits = daycare.len(),
        "parsed booking exports"
    );
    let report = occupancy(boarding, daycare, window);
    log_outcome("occupancy", &report.daily);
    Ok(report)
}

/// Reads the vaccination export and summarises expirations between the
/// resolved lookback date and `end`.
#[instrument(
    level = "info",
    skip_all,
    fields(input = %input.display(), ?lookback, %end, %today)
)]
pub fn run_vaccinations(
    input: &Path,
    lookback: Lookback,
    end: NaiveDate,
    today: NaiveDate,
    config: &AppConfig,
) -> Result<Report<VaccinationSummary>> {
    let lookback_date = lookback.resolve(today, &config.windows)?;
    let window = DateWindow::new(lookback_date, end)?;
    let records = read_vaccinations(excel_read::read_table(input)?, &config.vaccination)?;
    info!(records = records.len(), "read vaccination export");
    let report = vaccinations(&records, window);
    log_outcome("vaccinations", &report);
    Ok(report)
}

/// Reads both booking exports and lists clients without a future booking.
#[instrument(
    level = "info",
    skip_all,
    fields(boarding = %boarding.display(), daycare = %daycare.display(), ?lookback, %today)
)]
pub fn run_suggested_bookings(
    boarding: &Path,
    daycare: &Path,
    lookback: Lookback,
    today: NaiveDate,
    config: &AppConfig,
) -> Result<Report<ClientBookingSummary>> {
    let lookback_date = lookback.resolve(today, &config.windows)?;
    let boarding = parse_boarding(excel_read::read_table(boarding)?, &config.boarding)?;
    let daycare = parse_daycare(excel_read::read_table(daycare)?, &config.daycare)?;
    let report = suggested_bookings(boarding, daycare, lookback_date, today)?;
    log_outcome("suggested bookings", &report);
    Ok(report)
}

fn log_outcome<T>(name: &str, report: &Report<T>) {
    match &report.warning {
        Some(warning) => warn!(report = name, %warning, "report produced no rows"),
        None => info!(report = name, rows = report.rows.len(), "report ready"),
    }
}
