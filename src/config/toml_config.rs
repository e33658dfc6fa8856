use crate::core::aggregator::CorrelationMode;
use crate::utils::error::{Result, StatsError};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub data: DataConfig,
    pub statistics: Option<StatisticsConfig>,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    pub path: String,
    pub format: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatisticsConfig {
    pub correlation: Option<CorrelationMode>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub verbose: Option<bool>,
    pub json: Option<bool>,
}

impl TomlConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(StatsError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// Parses configuration from a TOML string after `${VAR}` substitution.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;
        Ok(toml::from_str(&processed_content)?)
    }

    /// Replaces `${VAR}` with the environment value; unknown variables are left as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| StatsError::ConfigValidationError {
            field: "env_substitution".to_string(),
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn correlation_mode(&self) -> Option<CorrelationMode> {
        self.statistics.as_ref().and_then(|s| s.correlation)
    }

    pub fn log_json(&self) -> Option<bool> {
        self.logging.as_ref().and_then(|l| l.json)
    }

    pub fn verbose(&self) -> Option<bool> {
        self.logging.as_ref().and_then(|l| l.verbose)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_path("data.path", &self.data.path)?;
        if let Some(format) = &self.data.format {
            validation::validate_one_of("data.format", format, &["csv", "json"])?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_toml_config() {
        let toml_content = r#"
[data]
path = "./data/countries.json"
format = "json"

[statistics]
correlation = "paired-means"

[logging]
verbose = true
json = false
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.data.path, "./data/countries.json");
        assert_eq!(config.correlation_mode(), Some(CorrelationMode::PairedMeans));
        assert_eq!(config.verbose(), Some(true));
        assert_eq!(config.log_json(), Some(false));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_optional_sections_may_be_omitted() {
        let config = TomlConfig::from_toml_str("[data]\npath = \"countries.csv\"\n").unwrap();
        assert!(config.correlation_mode().is_none());
        assert!(config.log_json().is_none());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("COUNTRY_STATS_TEST_DATA", "/tmp/countries.csv");

        let toml_content = r#"
[data]
path = "${COUNTRY_STATS_TEST_DATA}"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.data.path, "/tmp/countries.csv");

        std::env::remove_var("COUNTRY_STATS_TEST_DATA");
    }

    #[test]
    fn test_config_validation() {
        let toml_content = r#"
[data]
path = "countries.xml"
format = "xml"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert!(matches!(
            config.validate(),
            Err(StatsError::InvalidConfigValueError { .. })
        ));
    }

    #[test]
    fn test_format_is_case_insensitive() {
        let config =
            TomlConfig::from_toml_str("[data]\npath = \"countries\"\nformat = \"Csv\"\n").unwrap();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_unknown_correlation_mode_is_rejected() {
        let toml_content = r#"
[data]
path = "countries.csv"

[statistics]
correlation = "spearman"
"#;
        assert!(matches!(
            TomlConfig::from_toml_str(toml_content),
            Err(StatsError::TomlError(_))
        ));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[data]\npath = \"from-file.csv\"\n")
            .unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.data.path, "from-file.csv");
    }
}
