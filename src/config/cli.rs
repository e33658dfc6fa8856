use crate::config::toml_config::TomlConfig;
use crate::config::Settings;
use crate::core::aggregator::CorrelationMode;
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use clap::{Parser, ValueEnum};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, Parser)]
#[command(name = "country-stats")]
#[command(about = "Browse, edit and summarize per-country internet usage and literacy data")]
pub struct CliConfig {
    /// Data file holding the country table (CSV or JSON)
    #[arg(long)]
    pub data_file: Option<String>,

    /// Data file format; sniffed from the extension when omitted
    #[arg(long)]
    pub format: Option<String>,

    /// Optional TOML configuration file; flags given here override it
    #[arg(short, long)]
    pub config: Option<String>,

    /// Population the correlation centers on: single-field-means or paired-means
    #[arg(long)]
    pub correlation: Option<CorrelationMode>,

    /// Print the statistics report once and exit instead of opening the menu
    #[arg(long, value_enum)]
    pub report: Option<ReportFormat>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub log_json: bool,
}

impl CliConfig {
    /// Loads the TOML file if one was given, then applies the flags on top.
    pub fn resolve(&self) -> Result<Settings> {
        let mut settings = match &self.config {
            Some(path) => {
                let config = TomlConfig::from_file(path)?;
                config.validate()?;
                Settings::from(&config)
            }
            None => Settings::default(),
        };

        if let Some(path) = &self.data_file {
            settings.data_path = path.clone();
        }
        if let Some(format) = &self.format {
            settings.format = Some(format.clone());
        }
        if let Some(mode) = self.correlation {
            settings.correlation = mode;
        }
        settings.verbose |= self.verbose;
        settings.log_json |= self.log_json;

        settings.validate()?;
        Ok(settings)
    }
}
