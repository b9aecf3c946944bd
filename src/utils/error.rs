use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Io,
    Config,
    Data,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl CatalogError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::CsvError(_) | Self::IoError(_) => ErrorCategory::Io,
            Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. } => ErrorCategory::Config,
            Self::ProcessingError { .. } => ErrorCategory::Data,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // A missing or unreadable input table kills the whole run.
            Self::IoError(_) => ErrorSeverity::Critical,
            Self::CsvError(_) => ErrorSeverity::High,
            Self::ProcessingError { .. } => ErrorSeverity::High,
            Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. } => ErrorSeverity::Medium,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            Self::CsvError(_) => {
                "Check that the input tables are valid delimited text with a header row".to_string()
            }
            Self::IoError(_) => {
                "Check that the listing, pricing and output paths exist and are accessible"
                    .to_string()
            }
            Self::ConfigValidationError { field, .. }
            | Self::InvalidConfigValueError { field, .. }
            | Self::MissingConfigError { field } => {
                format!("Review the '{}' setting and run again", field)
            }
            Self::ProcessingError { .. } => {
                "Inspect the input data around the reported row".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::CsvError(e) => format!("Could not parse an input table: {}", e),
            Self::IoError(e) => format!("Could not read or write a file: {}", e),
            Self::ConfigValidationError { field, message } => {
                format!("Configuration problem ({}): {}", field, message)
            }
            Self::InvalidConfigValueError { field, value, reason } => {
                format!("'{}' is not a valid {} ({})", value, field, reason)
            }
            Self::MissingConfigError { field } => {
                format!("Required setting '{}' was not provided", field)
            }
            Self::ProcessingError { message } => format!("Processing failed: {}", message),
        }
    }
}

pub type Result<T> = std::result::Result<T, CatalogError>;
