use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WorkingDaysError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("{message}")]
    InvalidParameters { message: String },

    #[error("Holiday source error: {message}")]
    HolidaySourceError { message: String },

    #[error("{message}")]
    ServiceUnavailable { message: String },
}

pub type Result<T> = std::result::Result<T, WorkingDaysError>;

/// Error names exposed on the wire in `{error, message}` payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ErrorKind {
    InvalidParameters,
    ServiceUnavailable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Configuration,
    Upstream,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl WorkingDaysError {
    pub fn invalid_parameters(message: impl Into<String>) -> Self {
        WorkingDaysError::InvalidParameters {
            message: message.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            WorkingDaysError::InvalidParameters { .. } => ErrorKind::InvalidParameters,
            _ => ErrorKind::ServiceUnavailable,
        }
    }

    pub fn status_code(&self) -> u16 {
        match self.kind() {
            ErrorKind::InvalidParameters => 400,
            ErrorKind::ServiceUnavailable => 503,
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            WorkingDaysError::InvalidParameters { .. } => ErrorCategory::Input,
            WorkingDaysError::InvalidConfigValueError { .. } | WorkingDaysError::TomlError(_) => {
                ErrorCategory::Configuration
            }
            WorkingDaysError::ApiError(_)
            | WorkingDaysError::HolidaySourceError { .. }
            | WorkingDaysError::ServiceUnavailable { .. } => ErrorCategory::Upstream,
            WorkingDaysError::IoError(_) | WorkingDaysError::SerializationError(_) => {
                ErrorCategory::System
            }
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Input => ErrorSeverity::High,
            ErrorCategory::Upstream => ErrorSeverity::Medium,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Input => format!("Invalid request: {}", self),
            ErrorCategory::Configuration => format!("Configuration problem: {}", self),
            ErrorCategory::Upstream => format!("Holiday data unavailable: {}", self),
            ErrorCategory::System => format!("Unexpected failure: {}", self),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Input => {
                "Pass non-negative integers for days/hours and a UTC date such as 2025-04-10T15:00:00Z"
            }
            ErrorCategory::Configuration => "Check the configuration file and environment variables",
            ErrorCategory::Upstream => {
                "Check connectivity to the holidays URL or use --holidays-file with a local copy"
            }
            ErrorCategory::System => "Check file permissions and available disk space",
        }
    }
}
