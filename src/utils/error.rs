use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PortfolioError {
    #[error("Zip operation failed: {0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("HTTP client setup failed: {0}")]
    HttpClientError(#[from] reqwest::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration '{field}'")]
    MissingConfigError { field: String },

    #[error("Dataset error: {message}")]
    DatasetError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Network,
    Data,
    Storage,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl ErrorSeverity {
    /// Process exit status of the binary for a failed build.
    pub fn exit_code(self) -> i32 {
        match self {
            ErrorSeverity::High => 1,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::Critical => 3,
        }
    }
}

impl PortfolioError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            PortfolioError::ConfigError { .. }
            | PortfolioError::ConfigValidationError { .. }
            | PortfolioError::InvalidConfigValueError { .. }
            | PortfolioError::MissingConfigError { .. } => ErrorCategory::Configuration,
            PortfolioError::HttpClientError(_) => ErrorCategory::Network,
            PortfolioError::CsvError(_)
            | PortfolioError::SerializationError(_)
            | PortfolioError::DatasetError { .. } => ErrorCategory::Data,
            PortfolioError::ZipError(_) | PortfolioError::IoError(_) => ErrorCategory::Storage,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Data => ErrorSeverity::High,
            ErrorCategory::Storage => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            PortfolioError::ConfigError { .. } | PortfolioError::ConfigValidationError { .. } => {
                "Check that the configuration file exists and is valid TOML"
            }
            PortfolioError::InvalidConfigValueError { .. } => {
                "Correct the highlighted configuration value and run again"
            }
            PortfolioError::MissingConfigError { .. } => {
                "Add the missing field to the configuration file or pass it on the command line"
            }
            PortfolioError::HttpClientError(_) => {
                "Check the TLS setup of this machine; the scholar client could not be created"
            }
            PortfolioError::CsvError(_)
            | PortfolioError::SerializationError(_)
            | PortfolioError::DatasetError { .. } => {
                "An embedded dataset could not be processed; check lattice parameters and data files"
            }
            PortfolioError::ZipError(_) | PortfolioError::IoError(_) => {
                "Make sure the output directory is writable and has free space"
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Configuration => format!("Configuration problem: {}", self),
            ErrorCategory::Network => format!("Network setup problem: {}", self),
            ErrorCategory::Data => format!("Could not build portfolio content: {}", self),
            ErrorCategory::Storage => format!("Could not write the portfolio bundle: {}", self),
        }
    }

    /// The two lines printed to stderr when a build fails.
    pub fn cli_report(&self) -> String {
        format!(
            "❌ {}\n💡 Suggestion: {}",
            self.user_friendly_message(),
            self.recovery_suggestion()
        )
    }
}

pub type Result<T> = std::result::Result<T, PortfolioError>;

/// Failure of the scholarly index lookup.
///
/// Every variant is resolved to the fallback record inside
/// `ProfileDataProvider`; none of them reaches the rendering layer.
#[derive(Error, Debug)]
pub enum LookupError {
    #[error("scholar request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("scholar lookup timed out after {0:?}")]
    Timeout(Duration),

    #[error("no author found for identifier '{0}'")]
    NotFound(String),

    #[error("scholar index answered with status {status}")]
    Status { status: u16 },

    #[error("malformed scholar response: {0}")]
    Malformed(String),

    #[error("scholar response is missing field '{0}'")]
    MissingField(&'static str),
}

pub type LookupResult<T> = std::result::Result<T, LookupError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_errors_are_high_severity() {
        let err = PortfolioError::MissingConfigError {
            field: "scholar.id".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Configuration);
        assert_eq!(err.severity(), ErrorSeverity::High);
        assert!(err.user_friendly_message().contains("scholar.id"));
    }

    #[test]
    fn test_storage_errors_are_critical() {
        let err = PortfolioError::IoError(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "read-only",
        ));
        assert_eq!(err.severity(), ErrorSeverity::Critical);
    }

    #[test]
    fn test_exit_code_per_severity() {
        assert_eq!(ErrorSeverity::High.exit_code(), 1);
        assert_eq!(ErrorSeverity::Medium.exit_code(), 2);
        assert_eq!(ErrorSeverity::Critical.exit_code(), 3);
    }

    #[test]
    fn test_cli_report_lines() {
        let err = PortfolioError::DatasetError {
            message: "lattice needs at least one unit cell".to_string(),
        };
        let report = err.cli_report();
        let lines: Vec<&str> = report.lines().collect();

        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("❌ Could not build portfolio content:"));
        assert!(lines[1].starts_with("💡 Suggestion: An embedded dataset"));
        assert!(!report.chars().any(|c| ('\u{4e00}'..='\u{9fff}').contains(&c)));
    }

    #[test]
    fn test_lookup_error_messages() {
        assert_eq!(
            LookupError::MissingField("citedby").to_string(),
            "scholar response is missing field 'citedby'"
        );
        assert_eq!(
            LookupError::Status { status: 503 }.to_string(),
            "scholar index answered with status 503"
        );
    }
}
