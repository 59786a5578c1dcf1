#![allow(dead_code)]

use chrono::NaiveDate;
use pci_analysis::table::{Cell, RawTable};

pub const COMPANY: &str = "Pet Companions, inc.";

pub fn date(value: &str) -> NaiveDate {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").expect("test date")
}

fn sparse_row(width: usize, cells: &[(usize, Cell)]) -> Vec<Cell> {
    let mut row = vec![Cell::Empty; width];
    for (position, cell) in cells {
        row[*position] = cell.clone();
    }
    row
}

fn text(value: &str) -> Cell {
    Cell::text(value)
}

/// Boarding export with the default layout: client in A, pet in I, dates in
/// P and V, a title header row and a column-title row.
pub fn boarding_table(stays: &[(&str, &str, &str, &str)]) -> RawTable {
    let mut rows = vec![
        sparse_row(22, &[(0, text(COMPANY))]),
        sparse_row(
            22,
            &[
                (0, text("Client")),
                (8, text("Pet")),
                (15, text("In-Date")),
                (21, text("Out-Date")),
            ],
        ),
    ];
    for (client, pet, in_date, out_date) in stays {
        rows.push(sparse_row(22, &[]));
        rows.push(sparse_row(
            22,
            &[
                (0, text(client)),
                (8, text(pet)),
                (15, text(in_date)),
                (21, text(out_date)),
            ],
        ));
    }
    RawTable::from_rows(rows)
}

/// Daycare log with a title line followed by `lines` in column A.
pub fn daycare_table(lines: &[Cell]) -> RawTable {
    let mut rows = vec![
        vec![text(COMPANY), Cell::Empty],
        vec![text("Daycare Weekly Report"), Cell::Empty],
    ];
    for line in lines {
        rows.push(vec![line.clone(), Cell::Empty]);
    }
    RawTable::from_rows(rows)
}

/// One vaccination line: client, pet, vaccination, phone, expiration.
pub type VaccinationLine<'a> = (
    Option<&'a str>,
    Option<&'a str>,
    Option<&'a str>,
    Option<&'a str>,
    Option<&'a str>,
);

/// Vaccination export with the default layout and an `Owner` title row.
pub fn vaccination_table(lines: &[VaccinationLine<'_>]) -> RawTable {
    let mut rows = vec![
        sparse_row(20, &[(0, text("Expiring Vaccinations"))]),
        sparse_row(
            20,
            &[
                (4, text("Owner")),
                (6, text("Pet")),
                (11, text("Vaccine")),
                (16, text("Phone")),
                (19, text("Expires")),
            ],
        ),
    ];
    for (client, pet, vaccination, phone, expiration) in lines {
        let cells: Vec<(usize, Cell)> = [
            (4, client),
            (6, pet),
            (11, vaccination),
            (16, phone),
            (19, expiration),
        ]
        .into_iter()
        .filter_map(|(position, value)| value.map(|value| (position, text(value))))
        .collect();
        rows.push(sparse_row(20, &cells));
    }
    RawTable::from_rows(rows)
}
