//! Reconciles flattened rows into one rectangular table.
//!
//! Custom-field columns vary per record, so the header is the union of all
//! rows' columns rather than the first row's keys. Fixed columns come first in
//! field-map order; custom-field columns follow in first-seen order across the
//! whole collection. Cells missing from a row are padded with blanks.

use crate::core::flatten::field_map;
use crate::domain::model::{CellValue, FlatRow, ResourceKind, Table};
use indexmap::IndexSet;

pub fn build_table(kind: ResourceKind, rows: &[FlatRow]) -> Table {
    let mut columns: IndexSet<String> = field_map(kind)
        .iter()
        .map(|field| field.column.to_string())
        .collect();
    for row in rows {
        for column in row.cells.keys() {
            columns.insert(column.clone());
        }
    }
    let columns: Vec<String> = columns.into_iter().collect();

    let data_rows = rows
        .iter()
        .map(|row| {
            columns
                .iter()
                .map(|column| row.get(column).cloned().unwrap_or(CellValue::Blank))
                .collect()
        })
        .collect();

    Table {
        columns,
        rows: data_rows,
    }
}
