use std::io::{Read, Seek};
use std::path::Path;

use calamine::{DataType, Range, Reader, Sheets, open_workbook_auto};
use tracing::debug;

use crate::pci::analysis::error::{ReportError, Result};
use crate::pci::analysis::table::{Cell, RawTable, excel_serial_to_datetime};

/// Reads the first worksheet of an `.xls`, `.xlsx`, `.xlsm`, `.xlsb` or `.ods`
/// file into a [`RawTable`].
///
/// Column positions in the returned table are absolute sheet columns, even
/// when the used range of the sheet does not start at column A.
pub fn read_table(path: &Path) -> Result<RawTable> {
    if !path.exists() {
        return Err(ReportError::MissingInput(path.to_path_buf()));
    }

    let mut workbook = open_workbook_auto(path)?;
    let range = read_first_sheet(&mut workbook)?;
    let table = range_to_table(&range);
    debug!(
        path = %path.display(),
        rows = table.rows().len(),
        width = table.width(),
        "read worksheet"
    );
    Ok(table)
}

fn read_first_sheet<RS: Read + Seek>(workbook: &mut Sheets<RS>) -> Result<Range<DataType>> {
    let range_result = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| ReportError::Structural("workbook contains no worksheets".into()))?;
    let range = range_result.map_err(ReportError::from)?;
    Ok(range)
}

/// Converts a calamine range into a table anchored at its sheet position.
pub fn range_to_table(range: &Range<DataType>) -> RawTable {
    let (first_row, first_column) = range
        .start()
        .map(|(row, column)| (row as usize, column as usize))
        .unwrap_or((0, 0));

    let rows = range
        .rows()
        .map(|row| {
            let mut cells = vec![Cell::Empty; first_column];
            cells.extend(row.iter().map(convert_cell));
            cells
        })
        .collect();

    RawTable::from_rows_at(first_row + 1, rows)
}

fn convert_cell(cell: &DataType) -> Cell {
    match cell {
        DataType::Empty => Cell::Empty,
        DataType::String(value) => Cell::text(value.clone()),
        DataType::Float(value) => Cell::Number(*value),
        DataType::Int(value) => Cell::Number(*value as f64),
        DataType::Bool(value) => Cell::Bool(*value),
        DataType::DateTime(serial) => excel_serial_to_datetime(*serial)
            .map(Cell::DateTime)
            .unwrap_or(Cell::Number(*serial)),
        other => Cell::text(other.to_string()),
    }
}
