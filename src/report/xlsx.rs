//! Spreadsheet generation for one reconciled table.

use crate::domain::model::{CellValue, Table};
use crate::utils::error::Result;
use rust_xlsxwriter::{Format, Workbook};

const MIN_COLUMN_WIDTH: f64 = 12.0;
const MAX_COLUMN_WIDTH: f64 = 40.0;

/// Render one table as a single-worksheet workbook and return the file bytes.
pub fn generate(sheet_name: &str, table: &Table) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(sheet_name)?;

    let bold = Format::new().set_bold();
    for (col, header) in table.columns.iter().enumerate() {
        let c = u16::try_from(col)?;
        worksheet.write_string_with_format(0, c, header, &bold)?;
        worksheet.set_column_width(c, column_width(header))?;
    }

    for (row, cells) in table.rows.iter().enumerate() {
        let r = u32::try_from(row + 1)?;
        for (col, cell) in cells.iter().enumerate() {
            let c = u16::try_from(col)?;
            match cell {
                CellValue::Blank => {}
                CellValue::Text(s) => {
                    worksheet.write_string(r, c, s)?;
                }
                CellValue::Number(n) => {
                    worksheet.write_number(r, c, *n)?;
                }
            }
        }
    }

    Ok(workbook.save_to_buffer()?)
}

fn column_width(header: &str) -> f64 {
    (header.len() as f64 + 4.0).clamp(MIN_COLUMN_WIDTH, MAX_COLUMN_WIDTH)
}
