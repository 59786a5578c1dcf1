use std::fs::File;
use std::io::Write;
use std::path::Path;

use serde::Serialize;

use crate::pci::analysis::error::{ReportError, Result};
use crate::pci::analysis::model::{
    ClientBookingSummary, DailyAggregate, VaccinationSummary, VisitRow,
};

/// A row type with a fixed CSV header, written even when there are no rows.
pub trait CsvRecord: Serialize {
    const HEADERS: &'static [&'static str];
}

impl CsvRecord for DailyAggregate {
    const HEADERS: &'static [&'static str] = &[
        "Date",
        "daycare_visits",
        "boarding_visits",
        "arriving_count",
        "ongoing_count",
        "departing_count",
        "headcount",
        "Day of Week",
    ];
}

impl CsvRecord for VaccinationSummary {
    const HEADERS: &'static [&'static str] = &[
        "Client",
        "Pet",
        "Phone Number",
        "Vaccination Info",
        "Earliest Expiration",
    ];
}

impl CsvRecord for ClientBookingSummary {
    const HEADERS: &'static [&'static str] = &[
        "Client",
        "total_visits",
        "last_visit",
        "future_visits",
        "has_future_booking",
    ];
}

impl CsvRecord for VisitRow<'_> {
    const HEADERS: &'static [&'static str] = &[
        "Date",
        "Day of Week",
        "Client",
        "Pet",
        "Visit Type",
        "board_type",
    ];
}

/// Writes `rows` as CSV, header first.
pub fn write_csv<W: Write, T: CsvRecord>(writer: W, rows: &[T]) -> Result<()> {
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    csv_writer.write_record(T::HEADERS)?;
    for row in rows {
        csv_writer.serialize(row)?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Renders `rows` as CSV text.
pub fn to_csv_string<T: CsvRecord>(rows: &[T]) -> Result<String> {
    let mut buffer = Vec::new();
    write_csv(&mut buffer, rows)?;
    String::from_utf8(buffer).map_err(|err| {
        ReportError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, err))
    })
}

/// Writes `rows` as CSV to the file at `path`, replacing it.
pub fn write_csv_file<T: CsvRecord>(path: &Path, rows: &[T]) -> Result<()> {
    let file = File::create(path)?;
    write_csv(file, rows)
}
