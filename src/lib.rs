pub mod config;
pub mod core;
pub mod domain;
pub mod mail;
pub mod report;
pub mod utils;

pub use crate::config::{storage::LocalStorage, CliConfig};
pub use crate::core::{etl::ExportEngine, pipeline::ExportPipeline};
pub use crate::utils::error::{ExportError, Result};
