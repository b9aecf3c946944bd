pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use config::cli::LocalStorage;
#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use core::{etl::CatalogEngine, pipeline::CatalogPipeline};
pub use utils::error::{CatalogError, Result};
