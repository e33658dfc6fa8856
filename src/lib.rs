pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::{CliConfig, ReportFormat};

pub use adapters::{FileStore, LocalStorage, MemoryStore};
pub use app::Prompter;
pub use config::Settings;
pub use core::aggregator::CorrelationMode;
pub use core::report::StatisticsReport;
pub use domain::model::{Country, Field};
pub use utils::error::{Result, StatsError};
