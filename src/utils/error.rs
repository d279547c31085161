use thiserror::Error;

#[derive(Error, Debug)]
pub enum SheetError {
    #[error("Zip operation failed: {0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("RIP request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Missing required field '{field}' ({location})")]
    MissingFieldError { field: String, location: String },

    #[error("Cannot read image '{path}': {message}")]
    ImageProbeError { path: String, message: String },

    #[error("RIP controller rejected job (HTTP {status}): {body}")]
    SubmissionError { status: u16, body: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Input,
    Network,
    Storage,
    Processing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl SheetError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            SheetError::ConfigValidationError { .. }
            | SheetError::InvalidConfigValueError { .. }
            | SheetError::MissingConfigError { .. } => ErrorCategory::Configuration,
            SheetError::CsvError(_) | SheetError::MissingFieldError { .. } => ErrorCategory::Input,
            SheetError::ApiError(_) | SheetError::SubmissionError { .. } => ErrorCategory::Network,
            SheetError::IoError(_) | SheetError::ZipError(_) => ErrorCategory::Storage,
            SheetError::SerializationError(_) | SheetError::ImageProbeError { .. } => {
                ErrorCategory::Processing
            }
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // 單張圖檔讀不到只會降級成預設高度
            SheetError::ImageProbeError { .. } => ErrorSeverity::Low,
            SheetError::ApiError(_) | SheetError::SubmissionError { .. } => ErrorSeverity::Medium,
            SheetError::ConfigValidationError { .. }
            | SheetError::InvalidConfigValueError { .. }
            | SheetError::MissingConfigError { .. }
            | SheetError::MissingFieldError { .. }
            | SheetError::CsvError(_)
            | SheetError::SerializationError(_) => ErrorSeverity::High,
            SheetError::IoError(_) | SheetError::ZipError(_) => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            SheetError::ConfigValidationError { field, .. }
            | SheetError::InvalidConfigValueError { field, .. } => {
                format!("Check the value of '{}' in the configuration file", field)
            }
            SheetError::MissingConfigError { field } => {
                format!("Add '{}' to the configuration file or pass it on the command line", field)
            }
            SheetError::MissingFieldError { field, .. } => format!(
                "Make sure the pick list export contains a '{}' column on every row",
                field
            ),
            SheetError::CsvError(_) => {
                "Re-export the pick list as UTF-8 CSV with a header row".to_string()
            }
            SheetError::ApiError(_) => {
                "Check that the RIP controller is reachable and retry, or use --dry-run".to_string()
            }
            SheetError::SubmissionError { .. } => {
                "The job bundle was saved; check the print unit id and resubmit it".to_string()
            }
            SheetError::ImageProbeError { .. } => {
                "Re-export the artwork PNG; the fallback height was used for this run".to_string()
            }
            SheetError::IoError(_) | SheetError::ZipError(_) => {
                "Check that the output directory exists and is writable".to_string()
            }
            SheetError::SerializationError(_) => {
                "Run again with --verbose and report the log".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Configuration => format!("Configuration problem: {}", self),
            ErrorCategory::Input => format!("Pick list problem: {}", self),
            ErrorCategory::Network => format!("Could not submit to the RIP: {}", self),
            ErrorCategory::Storage => format!("Could not write output: {}", self),
            ErrorCategory::Processing => format!("Layout failed: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, SheetError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_field_is_fatal_input_error() {
        let err = SheetError::MissingFieldError {
            field: "SKU".to_string(),
            location: "header".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Input);
        assert_eq!(err.severity(), ErrorSeverity::High);
        assert!(err.recovery_suggestion().contains("SKU"));
    }

    #[test]
    fn test_image_probe_error_is_low_severity() {
        let err = SheetError::ImageProbeError {
            path: "art/HD-FOX-S-3XL.png".to_string(),
            message: "not a png".to_string(),
        };
        assert_eq!(err.severity(), ErrorSeverity::Low);
        assert!(err.user_friendly_message().starts_with("Layout failed"));
    }

    #[test]
    fn test_missing_config_points_at_field() {
        let err = SheetError::MissingConfigError {
            field: "rip.controller_url".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Configuration);
        assert!(err.recovery_suggestion().contains("rip.controller_url"));
        assert!(err.user_friendly_message().starts_with("Configuration problem"));
    }

    #[test]
    fn test_submission_error_message_has_status() {
        let err = SheetError::SubmissionError {
            status: 503,
            body: "busy".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Network);
        assert!(err.to_string().contains("503"));
    }
}
