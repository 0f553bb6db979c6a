pub mod collector;
pub mod etl;
pub mod flatten;
pub mod pipeline;
pub mod table;

pub use crate::domain::model::{
    CellValue, Collection, FlatRow, KindTable, Record, ResourceKind, Table,
};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
