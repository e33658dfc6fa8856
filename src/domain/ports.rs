use crate::core::aggregator::CorrelationMode;
use crate::domain::model::Country;
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
    fn exists(&self, path: &str) -> impl std::future::Future<Output = bool> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn data_path(&self) -> &str;
    fn data_format(&self) -> DataFormat;
    fn correlation_mode(&self) -> CorrelationMode;
    fn log_json(&self) -> bool;
}

/// Persistence for country records, keyed by code.
#[async_trait]
pub trait CountryStore: Send + Sync {
    async fn fetch_all(&self) -> Result<Vec<Country>>;
    async fn get_by_code(&self, code: &str) -> Result<Country>;
    async fn add(&mut self, country: Country) -> Result<()>;
    /// Replaces the record stored under `code`; the replacement may carry a new code.
    async fn update(&mut self, code: &str, country: Country) -> Result<()>;
    async fn delete(&mut self, code: &str) -> Result<Country>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataFormat {
    Csv,
    Json,
}

impl DataFormat {
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "csv" => Some(DataFormat::Csv),
            "json" => Some(DataFormat::Json),
            _ => None,
        }
    }

    /// Picks the format from the file extension, defaulting to CSV.
    pub fn from_path(path: &str) -> Self {
        std::path::Path::new(path)
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::parse)
            .unwrap_or(DataFormat::Csv)
    }
}
