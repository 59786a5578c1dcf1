//! Expansion of the "Total Days Boarded" export into visit-days.

use chrono::NaiveDate;
use tracing::{debug, warn};

use crate::pci::analysis::config::BoardingLayout;
use crate::pci::analysis::error::Result;
use crate::pci::analysis::model::{BoardType, VisitDayRecord};
use crate::pci::analysis::table::RawTable;

/// Turns a boarding export into one record per boarded day, sorted by date.
///
/// The client column is found through its header; pet and dates are read
/// from the layout's positions. The first row carrying a client is the
/// export's column-title row and is skipped. Any unreadable date aborts the
/// whole file.
pub fn parse_boarding(table: RawTable, layout: &BoardingLayout) -> Result<Vec<VisitDayRecord>> {
    let table = table.prune();
    let client_column = table.column_by_header(&layout.client_header)?;
    let pet_column = table.require_column(layout.pet_column, "Pet")?;
    let in_column = table.require_column(layout.in_date_column, "In-Date")?;
    let out_column = table.require_column(layout.out_date_column, "Out-Date")?;

    let stays = table
        .rows()
        .iter()
        .filter(|row| !row.cell(client_column).is_empty())
        .skip(1);

    let mut records = Vec::new();
    let mut stay_count = 0usize;
    for row in stays {
        let client = row.cell(client_column).as_text().unwrap_or_default();
        let pet = row.cell(pet_column).as_text().unwrap_or_default();
        let in_date = row.cell(in_column).to_date(row.number, "In-Date")?;
        let out_date = row.cell(out_column).to_date(row.number, "Out-Date")?;

        if out_date < in_date {
            warn!(
                row = row.number,
                %client,
                %in_date,
                %out_date,
                "boarding stay ends before it starts; no days recorded"
            );
        }
        records.extend(expand_stay(&client, &pet, in_date, out_date));
        stay_count += 1;
    }

    records.sort_by_key(|record| record.date);
    debug!(
        stays = stay_count,
        visit_days = records.len(),
        "expanded boarding stays"
    );
    Ok(records)
}

/// Expands one stay over its inclusive date range.
///
/// The first day arrives and the last day departs; a single-day stay yields
/// one arriving record only.
pub fn expand_stay(
    client: &str,
    pet: &str,
    in_date: NaiveDate,
    out_date: NaiveDate,
) -> Vec<VisitDayRecord> {
    in_date
        .iter_days()
        .take_while(|day| *day <= out_date)
        .map(|day| {
            let board_type = if day == in_date {
                BoardType::Arriving
            } else if day == out_date {
                BoardType::Departing
            } else {
                BoardType::Ongoing
            };
            VisitDayRecord::boarding(day, client, pet, board_type)
        })
        .collect()
}
