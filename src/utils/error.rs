use thiserror::Error;

#[derive(Error, Debug)]
pub enum StatsError {
    #[error("No record has a value for {field}")]
    EmptyDataset { field: String },

    #[error("Correlation is undefined over {paired} paired records: {reason}")]
    DegenerateCorrelation { paired: usize, reason: String },

    #[error("Country not found: {code}")]
    CountryNotFound { code: String },

    #[error("A country with code {code} already exists")]
    DuplicateCode { code: String },

    #[error("Invalid {field}: {message}")]
    ValidationError { field: String, message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to write data file {path}: {source}")]
    StorageError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Configuration error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Computation,
    Data,
    Input,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl StatsError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            StatsError::EmptyDataset { .. } | StatsError::DegenerateCorrelation { .. } => {
                ErrorCategory::Computation
            }
            StatsError::CountryNotFound { .. }
            | StatsError::DuplicateCode { .. }
            | StatsError::CsvError(_)
            | StatsError::SerializationError(_)
            | StatsError::StorageError { .. } => ErrorCategory::Data,
            StatsError::ValidationError { .. } => ErrorCategory::Input,
            StatsError::TomlError(_)
            | StatsError::ConfigValidationError { .. }
            | StatsError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            StatsError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Computation => ErrorSeverity::Low,
            ErrorCategory::Input => ErrorSeverity::Medium,
            ErrorCategory::Data | ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            StatsError::EmptyDataset { field } => {
                format!("There is no {} data to summarize yet.", field)
            }
            StatsError::DegenerateCorrelation { .. } => {
                "The correlation coefficient cannot be computed for the current data.".to_string()
            }
            StatsError::CountryNotFound { .. } => {
                "The country you tried to get is not in the database.".to_string()
            }
            StatsError::DuplicateCode { code } => {
                format!("The country code {} is already in use.", code)
            }
            StatsError::ValidationError { message, .. } => message.clone(),
            StatsError::IoError(_) => "Something went wrong with the stream.".to_string(),
            StatsError::StorageError { path, .. } => {
                format!("The data file {} could not be written; nothing was changed.", path)
            }
            StatsError::CsvError(_) | StatsError::SerializationError(_) => {
                "The data file could not be read or written.".to_string()
            }
            _ => format!("Configuration problem: {}", self),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            StatsError::EmptyDataset { .. } => "Add a value for this column to at least one country",
            StatsError::DegenerateCorrelation { .. } => {
                "Add countries with both values present and differing percentages"
            }
            StatsError::CountryNotFound { .. } => "Check the code in the data table and try again",
            StatsError::DuplicateCode { .. } => "Pick a code that is not in the data table",
            StatsError::ValidationError { .. } => "Re-enter the value in the requested format",
            StatsError::IoError(_) => "Check file permissions and that the path exists",
            StatsError::StorageError { .. } => {
                "Check that the data file is writable, then repeat the change"
            }
            StatsError::CsvError(_) | StatsError::SerializationError(_) => {
                "Check that the data file matches the expected columns"
            }
            StatsError::TomlError(_)
            | StatsError::ConfigValidationError { .. }
            | StatsError::InvalidConfigValueError { .. } => {
                "Fix the configuration file or command-line flags and rerun"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, StatsError>;
