//! Reading of the daycare weekly log, where date headers and `Client: Pet`
//! lines share a single column.

use chrono::NaiveDate;
use tracing::{debug, trace};

use crate::pci::analysis::config::DaycareLayout;
use crate::pci::analysis::error::{ReportError, Result};
use crate::pci::analysis::model::VisitDayRecord;
use crate::pci::analysis::table::{Cell, RawTable};

const CLIENT_PET_SEPARATOR: &str = ": ";

/// What a single log line means.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DaycareLine {
    DateHeader(NaiveDate),
    ClientPet { client: String, pet: String },
    Unrecognized,
}

/// Classifies a log cell before it is interpreted.
pub fn classify(cell: &Cell) -> DaycareLine {
    if let Some(timestamp) = cell.as_daycare_timestamp() {
        return DaycareLine::DateHeader(timestamp.date());
    }
    match cell {
        Cell::Text(text) => match text.split_once(CLIENT_PET_SEPARATOR) {
            Some((client, pet)) => DaycareLine::ClientPet {
                client: client.trim().to_string(),
                pet: pet.trim().to_string(),
            },
            None => DaycareLine::Unrecognized,
        },
        _ => DaycareLine::Unrecognized,
    }
}

/// Turns a daycare log into one record per visit, in log order.
///
/// The first non-empty line of the data column is the report title and is
/// skipped. A visit line before any date header fails the file with
/// [`ReportError::UndatedVisit`].
pub fn parse_daycare(table: RawTable, layout: &DaycareLayout) -> Result<Vec<VisitDayRecord>> {
    let table = table.prune();
    let data_column = table.column_by_header(&layout.data_header)?;

    let mut current_date: Option<NaiveDate> = None;
    let mut records = Vec::new();
    let mut skipped = 0usize;

    let lines = table
        .rows()
        .iter()
        .filter(|row| !row.cell(data_column).is_empty())
        .skip(1);

    for row in lines {
        let cell = row.cell(data_column);
        match classify(cell) {
            DaycareLine::DateHeader(date) => current_date = Some(date),
            DaycareLine::ClientPet { client, pet } => {
                let date = current_date.ok_or_else(|| ReportError::UndatedVisit {
                    row: row.number,
                    line: cell.as_text().unwrap_or_default(),
                })?;
                records.push(VisitDayRecord::daycare(date, client, pet));
            }
            DaycareLine::Unrecognized => {
                trace!(row = row.number, value = ?cell, "skipping daycare line");
                skipped += 1;
            }
        }
    }

    debug!(visits = records.len(), skipped, "parsed daycare log");
    Ok(records)
}
