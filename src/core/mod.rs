pub mod aggregator;
pub mod report;

pub use crate::domain::model::{Country, Field};
pub use crate::domain::ports::{ConfigProvider, CountryStore, DataFormat, Storage};
pub use crate::utils::error::Result;
