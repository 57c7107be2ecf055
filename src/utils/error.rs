use thiserror::Error;

#[derive(Error, Debug)]
pub enum DatingError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid date for '{field}': '{value}' (expected YYYY-MM-DD)")]
    InvalidDateError { field: String, value: String },

    #[error("Value {value} for '{field}' is outside {min}..={max}")]
    OutOfRangeError {
        field: String,
        value: i64,
        min: i64,
        max: i64,
    },

    #[error("Insufficient input to compute dating by {method}")]
    InsufficientInputError { method: String },

    #[error("Report rendering error: {message}")]
    RenderError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Configuration,
    Output,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl DatingError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            DatingError::InvalidDateError { .. }
            | DatingError::OutOfRangeError { .. }
            | DatingError::InsufficientInputError { .. } => ErrorCategory::Input,
            DatingError::ConfigValidationError { .. }
            | DatingError::InvalidConfigValueError { .. }
            | DatingError::MissingConfigError { .. } => ErrorCategory::Configuration,
            DatingError::SerializationError(_)
            | DatingError::CsvError(_)
            | DatingError::RenderError { .. } => ErrorCategory::Output,
            DatingError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            // 輸入不足只是「無法計算」，不是失敗
            ErrorCategory::Input => match self {
                DatingError::InsufficientInputError { .. } => ErrorSeverity::Medium,
                _ => ErrorSeverity::High,
            },
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Output => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    /// 給終端使用者看的訊息
    pub fn user_friendly_message(&self) -> String {
        match self {
            DatingError::InvalidDateError { field, value } => {
                format!("'{}' is not a valid date for {}", value, field)
            }
            DatingError::OutOfRangeError {
                field,
                value,
                min,
                max,
            } => format!("{} must be between {} and {} (got {})", field, min, max, value),
            DatingError::InsufficientInputError { method } => {
                format!("Not enough information to date the pregnancy by {}", method)
            }
            DatingError::MissingConfigError { field } => {
                format!("Missing required setting: {}", field)
            }
            DatingError::IoError(e) => format!("Could not read or write a file: {}", e),
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Input => match self {
                DatingError::InsufficientInputError { .. } => {
                    "Provide the primary date (LMP or EDD) for the selected method"
                }
                DatingError::OutOfRangeError { .. } => {
                    "Check the gestational age at scan: weeks within the configured bounds, days 0-6"
                }
                _ => "Use ISO dates such as 2024-01-31",
            },
            ErrorCategory::Configuration => {
                "Check the TOML configuration file for typos and missing sections"
            }
            ErrorCategory::Output => "Try a different output format (text, json, csv, tsv)",
            ErrorCategory::System => "Check file permissions and that the path exists",
        }
    }
}

pub type Result<T> = std::result::Result<T, DatingError>;
