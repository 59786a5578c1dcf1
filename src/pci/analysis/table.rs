use chrono::{Duration, NaiveDate, NaiveDateTime};

use crate::pci::analysis::error::{ReportError, Result};

/// Date-only text formats accepted in date columns, tried in order.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y", "%Y/%m/%d"];
/// Date-time text formats accepted in date columns, tried before [`DATE_FORMATS`].
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%m/%d/%Y %H:%M:%S"];
/// The only text shape the daycare log uses for its date header rows.
pub const DAYCARE_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

static EMPTY: Cell = Cell::Empty;

/// A single spreadsheet cell after it has been lifted out of the reader.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
    DateTime(NaiveDateTime),
}

impl Cell {
    /// Builds a text cell, treating whitespace-only input as an empty cell.
    pub fn text(value: impl Into<String>) -> Self {
        let value = value.into();
        if value.trim().is_empty() {
            Cell::Empty
        } else {
            Cell::Text(value)
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    /// Renders the cell the way it reads in the sheet. Returns `None` for
    /// empty cells.
    pub fn as_text(&self) -> Option<String> {
        match self {
            Cell::Empty => None,
            Cell::Text(value) => Some(value.trim().to_string()),
            Cell::Number(value) => Some(format_number(*value)),
            Cell::Bool(value) => Some(value.to_string()),
            Cell::DateTime(value) => Some(value.format(DAYCARE_TIMESTAMP_FORMAT).to_string()),
        }
    }

    /// Interprets the cell as a calendar date.
    ///
    /// `row` and `column` only feed the error message.
    pub fn to_date(&self, row: usize, column: &str) -> Result<NaiveDate> {
        match self {
            Cell::DateTime(value) => Ok(value.date()),
            Cell::Text(value) => parse_date_text(value).ok_or_else(|| {
                ReportError::parse(row, column, value.as_str(), "unrecognised date format")
            }),
            Cell::Number(value) => excel_serial_to_datetime(*value)
                .map(|dt| dt.date())
                .ok_or_else(|| {
                    ReportError::parse(row, column, value.to_string(), "not a spreadsheet date")
                }),
            Cell::Bool(value) => Err(ReportError::parse(
                row,
                column,
                value.to_string(),
                "not a date",
            )),
            Cell::Empty => Err(ReportError::parse(row, column, "", "missing date")),
        }
    }

    /// Strict timestamp check used for daycare date headers: either a native
    /// date cell or text in exactly [`DAYCARE_TIMESTAMP_FORMAT`].
    pub fn as_daycare_timestamp(&self) -> Option<NaiveDateTime> {
        match self {
            Cell::DateTime(value) => Some(*value),
            Cell::Text(value) => {
                NaiveDateTime::parse_from_str(value.trim(), DAYCARE_TIMESTAMP_FORMAT).ok()
            }
            _ => None,
        }
    }
}

fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

fn parse_date_text(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
        .map(|dt| dt.date())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|format| NaiveDate::parse_from_str(text, format).ok())
        })
}

/// Converts an Excel 1900-system serial number into a date-time.
pub fn excel_serial_to_datetime(serial: f64) -> Option<NaiveDateTime> {
    if !serial.is_finite() || serial < 0.0 {
        return None;
    }
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?.and_hms_opt(0, 0, 0)?;
    let days = serial.trunc() as i64;
    let seconds = (serial.fract() * 86_400.0).round() as i64;
    let offset = Duration::try_days(days)?.checked_add(&Duration::try_seconds(seconds)?)?;
    epoch.checked_add_signed(offset)
}

/// One data row of a [`RawTable`] together with its 1-based sheet row number.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub number: usize,
    pub cells: Vec<Cell>,
}

impl Row {
    /// Returns the cell at a source column position, or an empty cell when
    /// the row is shorter than that.
    pub fn cell(&self, position: usize) -> &Cell {
        self.cells.get(position).unwrap_or(&EMPTY)
    }

    pub fn is_blank(&self) -> bool {
        self.cells.iter().all(Cell::is_empty)
    }
}

/// A rectangular sheet as exported by the booking software: one header row
/// followed by data rows, with columns addressed by their source position
/// (column A is position 0).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    header: Vec<Cell>,
    rows: Vec<Row>,
    width: usize,
    blank_columns: Vec<bool>,
}

impl RawTable {
    /// Builds a table whose first row is the header and which starts on sheet
    /// row 1.
    pub fn from_rows(rows: Vec<Vec<Cell>>) -> Self {
        Self::from_rows_at(1, rows)
    }

    /// Builds a table whose first row (the header) sits on sheet row
    /// `first_row`.
    pub fn from_rows_at(first_row: usize, rows: Vec<Vec<Cell>>) -> Self {
        let width = rows.iter().map(Vec::len).max().unwrap_or(0);
        let mut rows = rows.into_iter();
        let header = rows.next().unwrap_or_default();
        let rows: Vec<Row> = rows
            .enumerate()
            .map(|(offset, cells)| Row {
                number: first_row + offset + 1,
                cells,
            })
            .collect();
        Self {
            header,
            rows,
            width,
            blank_columns: vec![false; width],
        }
    }

    /// Drops rows that are entirely blank and marks columns whose data cells
    /// are all blank as absent.
    pub fn prune(mut self) -> Self {
        self.rows.retain(|row| !row.is_blank());
        self.blank_columns = (0..self.width)
            .map(|position| self.rows.iter().all(|row| row.cell(position).is_empty()))
            .collect();
        self
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Header text at a source position.
    pub fn header_at(&self, position: usize) -> Option<String> {
        self.header.get(position).and_then(Cell::as_text)
    }

    /// Locates the first column whose header reads exactly `name`.
    pub fn column_by_header(&self, name: &str) -> Result<usize> {
        self.header
            .iter()
            .position(|cell| cell.as_text().as_deref() == Some(name))
            .ok_or_else(|| {
                ReportError::Structural(format!(
                    "no column headed '{name}' in the first row of the sheet"
                ))
            })
    }

    /// Confirms that a positional column exists and carries data.
    pub fn require_column(&self, position: usize, logical_name: &str) -> Result<usize> {
        if position >= self.width {
            return Err(ReportError::Structural(format!(
                "column '{logical_name}' expected at position {position} but the sheet is only {} columns wide",
                self.width
            )));
        }
        if self.blank_columns.get(position).copied().unwrap_or(false) {
            return Err(ReportError::Structural(format!(
                "column '{logical_name}' at position {position} is empty"
            )));
        }
        Ok(position)
    }
}
