//! Turns one nested IPAM record into one flat spreadsheet row.
//!
//! Each resource kind carries an ordered field map (column name, key path,
//! normalization mode). Lookups are defensive: a missing key becomes a blank
//! cell, never an error. Custom fields become dynamic `CF: <name>` columns
//! after the fixed ones, in the record's own key order.

use crate::domain::model::{CellValue, FlatRow, Record, ResourceKind};
use serde_json::{Map, Value};

/// Marker prepended to dynamic custom-field column names.
pub const CUSTOM_FIELD_PREFIX: &str = "CF: ";

const CUSTOM_FIELDS_KEY: &str = "custom_fields";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Copy the scalar unchanged (identifiers, dates, numbers, free text).
    Raw,
    /// Run through the shared display-string normalization.
    Display,
}

#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub column: &'static str,
    pub path: &'static str,
    pub mode: Mode,
}

const fn spec(column: &'static str, path: &'static str, mode: Mode) -> FieldSpec {
    FieldSpec { column, path, mode }
}

const RANGE_FIELDS: &[FieldSpec] = &[
    spec("ID", "id", Mode::Raw),
    spec("Range", "display", Mode::Raw),
    spec("Family", "family", Mode::Display),
    spec("Start Address", "start_address", Mode::Raw),
    spec("End Address", "end_address", Mode::Raw),
    spec("Size", "size", Mode::Raw),
    spec("Status", "status", Mode::Display),
    spec("Role", "role", Mode::Display),
    spec("VRF", "vrf", Mode::Display),
    spec("Tenant", "tenant", Mode::Display),
    spec("Description", "description", Mode::Raw),
    spec("Comments", "comments", Mode::Raw),
    spec("Created", "created", Mode::Raw),
    spec("Last Updated", "last_updated", Mode::Raw),
    spec("Tags", "tags", Mode::Display),
];

const ADDRESS_FIELDS: &[FieldSpec] = &[
    spec("ID", "id", Mode::Raw),
    spec("Address", "address", Mode::Raw),
    spec("Family", "family", Mode::Display),
    spec("Status", "status", Mode::Display),
    spec("Role", "role", Mode::Display),
    spec("VRF", "vrf", Mode::Display),
    spec("Tenant", "tenant", Mode::Display),
    spec("DNS Name", "dns_name", Mode::Raw),
    spec("Assigned Object", "assigned_object", Mode::Display),
    spec("NAT Inside", "nat_inside", Mode::Display),
    spec("Description", "description", Mode::Raw),
    spec("Created", "created", Mode::Raw),
    spec("Last Updated", "last_updated", Mode::Raw),
    spec("Tags", "tags", Mode::Display),
];

pub fn field_map(kind: ResourceKind) -> &'static [FieldSpec] {
    match kind {
        ResourceKind::Ranges => RANGE_FIELDS,
        ResourceKind::Addresses => ADDRESS_FIELDS,
    }
}

/// Flatten one record into an ordered row. Total: no record shape can make
/// this fail; every fixed column is present, blank when the key is missing.
pub fn flatten(record: &Record, kind: ResourceKind) -> FlatRow {
    let mut row = FlatRow::new();

    for field in field_map(kind) {
        let value = lookup(&record.data, field.path);
        let cell = match field.mode {
            Mode::Raw => raw_cell(value),
            Mode::Display => text_cell(display_value(value)),
        };
        row.insert(field.column.to_string(), cell);
    }

    if let Some(Value::Object(fields)) = record.data.get(CUSTOM_FIELDS_KEY) {
        for (key, value) in fields {
            row.insert(
                format!("{}{}", CUSTOM_FIELD_PREFIX, key),
                text_cell(display_value(Some(value))),
            );
        }
    }

    row
}

/// Resolve a dotted key path against a record, e.g. `assigned_object.device`.
fn lookup<'a>(data: &'a Map<String, Value>, path: &str) -> Option<&'a Value> {
    let mut segments = path.split('.');
    let mut current = data.get(segments.next()?)?;
    for segment in segments {
        current = current.as_object()?.get(segment)?;
    }
    Some(current)
}

/// Passthrough cell: scalars keep their type, anything structured degrades to
/// its display string.
fn raw_cell(value: Option<&Value>) -> CellValue {
    match value {
        None | Some(Value::Null) => CellValue::Blank,
        Some(Value::String(s)) => CellValue::Text(s.clone()),
        Some(Value::Number(n)) => n
            .as_f64()
            .map(CellValue::Number)
            .unwrap_or_else(|| CellValue::Text(n.to_string())),
        other => text_cell(display_value(other)),
    }
}

fn text_cell(s: String) -> CellValue {
    if s.is_empty() {
        CellValue::Blank
    } else {
        CellValue::Text(s)
    }
}

/// Shared value-to-display-string normalization.
///
/// Nested reference objects resolve to the first non-empty of their
/// `display`, `name`, `label`, `value` fields; lists join their items with
/// ", " after dropping empties; booleans become the literal tokens
/// "TRUE"/"FALSE".
pub fn display_value(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(true)) => "TRUE".to_string(),
        Some(Value::Bool(false)) => "FALSE".to_string(),
        Some(Value::Object(map)) => object_display(map),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| display_value(Some(item)))
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(", "),
    }
}

fn object_display(map: &Map<String, Value>) -> String {
    for key in ["display", "name", "label", "value"] {
        if let Some(value) = map.get(key) {
            let rendered = display_value(Some(value));
            if !rendered.is_empty() {
                return rendered;
            }
        }
    }
    // No recognizable reference field: fall back to a generic JSON rendering.
    serde_json::to_string(map).unwrap_or_default()
}
