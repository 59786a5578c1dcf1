//! Expiring-vaccination summary per client and pet.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use tracing::debug;

use crate::pci::analysis::config::VaccinationLayout;
use crate::pci::analysis::error::{ReportError, Result};
use crate::pci::analysis::model::{VaccinationRecord, VaccinationSummary};
use crate::pci::analysis::table::RawTable;
use crate::pci::analysis::window::DateWindow;

/// Resolved column positions of a vaccination export.
struct Columns {
    client: usize,
    pet: usize,
    vaccination: usize,
    phone: usize,
    expiration: usize,
}

impl Columns {
    fn resolve(table: &RawTable, layout: &VaccinationLayout) -> Result<Self> {
        Ok(Self {
            client: table.require_column(layout.client_column, "Client")?,
            pet: table.require_column(layout.pet_column, "Pet")?,
            vaccination: table.require_column(layout.vaccination_column, "Vaccination")?,
            phone: table.require_column(layout.phone_column, "Phone Number")?,
            expiration: table.require_column(layout.expiration_column, "Expiration Date")?,
        })
    }
}

/// Reads the vaccination lines that follow the `Owner` title row.
///
/// Client, phone number and pet only appear on the first line of each
/// client's block and are carried down to the following lines. Lines with
/// neither a vaccination nor an expiration date are dropped.
pub fn read_vaccinations(
    table: RawTable,
    layout: &VaccinationLayout,
) -> Result<Vec<VaccinationRecord>> {
    let table = table.prune();
    let columns = Columns::resolve(&table, layout)?;

    let marker = table
        .rows()
        .iter()
        .position(|row| {
            row.cell(columns.client).as_text().as_deref() == Some(layout.owner_marker.as_str())
        })
        .ok_or_else(|| {
            ReportError::Structural(format!(
                "no row with '{}' in the client column (position {})",
                layout.owner_marker, layout.client_column
            ))
        })?;

    let mut client = None;
    let mut phone_number = None;
    let mut pet = None;
    let mut records = Vec::new();

    for row in &table.rows()[marker + 1..] {
        fill_down(&mut client, row.cell(columns.client).as_text());
        fill_down(&mut phone_number, row.cell(columns.phone).as_text());
        fill_down(&mut pet, row.cell(columns.pet).as_text());

        let vaccination_name = row.cell(columns.vaccination).as_text();
        let expiration_cell = row.cell(columns.expiration);
        if vaccination_name.is_none() && expiration_cell.is_empty() {
            continue;
        }
        let expiration_date = if expiration_cell.is_empty() {
            None
        } else {
            Some(expiration_cell.to_date(row.number, "Expiration Date")?)
        };

        records.push(VaccinationRecord {
            client: client.clone(),
            pet: pet.clone(),
            phone_number: phone_number.clone(),
            vaccination_name,
            expiration_date,
        });
    }

    debug!(records = records.len(), "read vaccination lines");
    Ok(records)
}

fn fill_down(slot: &mut Option<String>, value: Option<String>) {
    if value.is_some() {
        *slot = value;
    }
}

/// Groups the vaccinations expiring inside `window` by client, pet and phone
/// number, earliest expiration first.
///
/// Lines whose client, pet or phone number is still unknown after filling
/// down are left out.
pub fn summarize(records: &[VaccinationRecord], window: &DateWindow) -> Vec<VaccinationSummary> {
    let mut groups: BTreeMap<(&str, &str, &str), (Vec<String>, NaiveDate)> = BTreeMap::new();

    for record in records {
        let Some(expiration) = record.expiration_date.filter(|date| window.contains(*date))
        else {
            continue;
        };
        let (Some(client), Some(pet), Some(phone)) = (
            record.client.as_deref(),
            record.pet.as_deref(),
            record.phone_number.as_deref(),
        ) else {
            continue;
        };

        let entry = match record.vaccination_name.as_deref() {
            Some(name) => format!("{} {name}", expiration.format("%Y-%m-%d")),
            None => expiration.format("%Y-%m-%d").to_string(),
        };
        let group = groups
            .entry((client, pet, phone))
            .or_insert_with(|| (Vec::new(), expiration));
        group.0.push(entry);
        group.1 = group.1.min(expiration);
    }

    let mut summaries: Vec<VaccinationSummary> = groups
        .into_iter()
        .map(
            |((client, pet, phone), (entries, earliest))| VaccinationSummary {
                client: client.to_string(),
                pet: pet.to_string(),
                phone_number: phone.to_string(),
                vaccination_info: entries.join(", "),
                earliest_expiration: earliest,
            },
        )
        .collect();
    summaries.sort_by_key(|summary| summary.earliest_expiration);
    summaries
}
