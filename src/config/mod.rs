#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::core::aggregator::CorrelationMode;
use crate::core::{ConfigProvider, DataFormat};
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use serde::Serialize;
use toml_config::TomlConfig;

pub const DEFAULT_DATA_PATH: &str = "./data/countries.csv";

/// Resolved runtime settings, after the TOML file and command-line flags are merged.
#[derive(Debug, Clone, Serialize)]
pub struct Settings {
    pub data_path: String,
    pub format: Option<String>,
    pub correlation: CorrelationMode,
    pub verbose: bool,
    pub log_json: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_path: DEFAULT_DATA_PATH.to_string(),
            format: None,
            correlation: CorrelationMode::default(),
            verbose: false,
            log_json: false,
        }
    }
}

impl From<&TomlConfig> for Settings {
    fn from(config: &TomlConfig) -> Self {
        let defaults = Settings::default();
        Self {
            data_path: config.data.path.clone(),
            format: config.data.format.clone(),
            correlation: config.correlation_mode().unwrap_or(defaults.correlation),
            verbose: config.verbose().unwrap_or(defaults.verbose),
            log_json: config.log_json().unwrap_or(defaults.log_json),
        }
    }
}

impl ConfigProvider for Settings {
    fn data_path(&self) -> &str {
        &self.data_path
    }

    fn data_format(&self) -> DataFormat {
        self.format
            .as_deref()
            .and_then(DataFormat::parse)
            .unwrap_or_else(|| DataFormat::from_path(&self.data_path))
    }

    fn correlation_mode(&self) -> CorrelationMode {
        self.correlation
    }

    fn log_json(&self) -> bool {
        self.log_json
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        validation::validate_path("data_path", &self.data_path)?;
        if let Some(format) = &self.format {
            validation::validate_one_of("format", format, &["csv", "json"])?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_is_sniffed_from_extension() {
        let settings = Settings {
            data_path: "countries.JSON".to_string(),
            ..Settings::default()
        };
        assert_eq!(settings.data_format(), DataFormat::Json);
        assert_eq!(Settings::default().data_format(), DataFormat::Csv);
    }

    #[test]
    fn test_explicit_format_wins_over_extension() {
        let settings = Settings {
            data_path: "countries.dat".to_string(),
            format: Some("json".to_string()),
            ..Settings::default()
        };
        assert_eq!(settings.data_format(), DataFormat::Json);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_upper_case_format_is_accepted() {
        let settings = Settings {
            data_path: "countries.dat".to_string(),
            format: Some("JSON".to_string()),
            ..Settings::default()
        };
        assert!(settings.validate().is_ok());
        assert_eq!(settings.data_format(), DataFormat::Json);
    }

    #[test]
    fn test_settings_from_toml() {
        let config = TomlConfig::from_toml_str(
            "[data]\npath = \"a.csv\"\n[statistics]\ncorrelation = \"paired-means\"\n",
        )
        .unwrap();
        let settings = Settings::from(&config);
        assert_eq!(settings.data_path, "a.csv");
        assert_eq!(settings.correlation_mode(), CorrelationMode::PairedMeans);
        assert!(!settings.log_json());
    }
}
