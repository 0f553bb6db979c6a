use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One nested record as returned by the IPAM API. Key order is preserved
/// (serde_json `preserve_order`), which matters for custom-field columns.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Record {
    pub data: Map<String, Value>,
}

/// A scalar spreadsheet cell.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Blank,
    Text(String),
    Number(f64),
}

impl CellValue {
    pub fn is_blank(&self) -> bool {
        match self {
            CellValue::Blank => true,
            CellValue::Text(s) => s.is_empty(),
            CellValue::Number(_) => false,
        }
    }

    pub fn display(&self) -> String {
        match self {
            CellValue::Blank => String::new(),
            CellValue::Text(s) => s.clone(),
            CellValue::Number(n) => n.to_string(),
        }
    }
}

/// One flattened record: an ordered column name → cell mapping.
#[derive(Debug, Clone, Default)]
pub struct FlatRow {
    pub cells: indexmap::IndexMap<String, CellValue>,
}

impl FlatRow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, column: String, cell: CellValue) {
        self.cells.insert(column, cell);
    }

    pub fn get(&self, column: &str) -> Option<&CellValue> {
        self.cells.get(column)
    }
}

/// A rectangular table ready for the spreadsheet writer: one header row plus
/// data rows whose cells line up with the header columns.
#[derive(Debug, Clone)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<CellValue>>,
}

/// The two exported resource collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Ranges,
    Addresses,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 2] = [ResourceKind::Ranges, ResourceKind::Addresses];

    /// Listing endpoint path relative to the API root.
    pub fn api_path(self) -> &'static str {
        match self {
            ResourceKind::Ranges => "ipam/ip-ranges/",
            ResourceKind::Addresses => "ipam/ip-addresses/",
        }
    }

    pub fn file_stem(self) -> &'static str {
        match self {
            ResourceKind::Ranges => "ip_ranges",
            ResourceKind::Addresses => "ip_addresses",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            ResourceKind::Ranges => "IP Ranges",
            ResourceKind::Addresses => "IP Addresses",
        }
    }
}

/// All records collected for one resource kind, in server page order.
#[derive(Debug, Clone)]
pub struct Collection {
    pub kind: ResourceKind,
    pub records: Vec<Record>,
}

/// The flattened, reconciled table for one resource kind.
#[derive(Debug, Clone)]
pub struct KindTable {
    pub kind: ResourceKind,
    pub table: Table,
}
