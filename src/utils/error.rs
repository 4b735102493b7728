use thiserror::Error;

#[derive(Error, Debug)]
pub enum SurveyError {
    #[error("Invalid cadastral number: {value}")]
    InvalidCadastralNumber { value: String },

    #[error("Invalid parcel area: {value}")]
    InvalidArea { value: f64 },

    #[error("Invalid parcel data: {message}")]
    InvalidParcelData { message: String },

    #[error("Parcel {cadastral_number} not found in the registry")]
    NotFound { cadastral_number: String },

    #[error("Registry request timed out")]
    Timeout,

    #[error("Registry transport failure: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("Registry returned HTTP {status}: {message}")]
    Registry { status: u16, message: String },

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Invalid value for {field}: {value} ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Lookup,
    Configuration,
    Internal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// Informational, the run still counts as a success.
    Low,
    /// Transient, retrying the same request may succeed.
    Medium,
    /// The request cannot succeed as given.
    High,
    /// The process is misconfigured or broken.
    Critical,
}

impl SurveyError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            SurveyError::InvalidCadastralNumber { .. } | SurveyError::InvalidArea { .. } => {
                ErrorCategory::Validation
            }
            SurveyError::InvalidParcelData { .. }
            | SurveyError::NotFound { .. }
            | SurveyError::Timeout
            | SurveyError::Transport(_)
            | SurveyError::Registry { .. } => ErrorCategory::Lookup,
            SurveyError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            SurveyError::SerializationError(_) => ErrorCategory::Internal,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            SurveyError::Timeout | SurveyError::Transport(_) | SurveyError::Registry { .. } => {
                ErrorSeverity::Medium
            }
            SurveyError::InvalidCadastralNumber { .. }
            | SurveyError::InvalidArea { .. }
            | SurveyError::InvalidParcelData { .. }
            | SurveyError::NotFound { .. } => ErrorSeverity::High,
            SurveyError::InvalidConfigValueError { .. } | SurveyError::SerializationError(_) => {
                ErrorSeverity::Critical
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            SurveyError::InvalidCadastralNumber { value } => {
                format!("'{}' is not a valid cadastral number", value)
            }
            SurveyError::NotFound { cadastral_number } => format!(
                "Parcel {} was not found in the NSPD registry",
                cadastral_number
            ),
            SurveyError::Timeout => "The registry did not answer in time".to_string(),
            SurveyError::Transport(_) => "Could not reach the NSPD registry".to_string(),
            SurveyError::Registry { status, .. } => {
                format!("The NSPD registry answered with an error (HTTP {})", status)
            }
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            SurveyError::InvalidCadastralNumber { .. } => {
                "Enter the number as XX:XX:XXXXXXX:XXXX, e.g. 77:09:0005004:1234"
            }
            SurveyError::InvalidArea { .. } | SurveyError::InvalidParcelData { .. } => {
                "The registry record is incomplete; verify the parcel on nspd.gov.ru"
            }
            SurveyError::NotFound { .. } => {
                "Check the cadastral number; the parcel may have been withdrawn from the register"
            }
            SurveyError::Timeout | SurveyError::Transport(_) | SurveyError::Registry { .. } => {
                "The registry may be temporarily unavailable, retry in a few minutes"
            }
            SurveyError::InvalidConfigValueError { .. } => {
                "Fix the command-line arguments and run again"
            }
            SurveyError::SerializationError(_) => "Re-run with --verbose and report the payload",
        }
    }
}

pub type Result<T> = std::result::Result<T, SurveyError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_errors_are_retryable() {
        assert_eq!(SurveyError::Timeout.severity(), ErrorSeverity::Medium);
        assert_eq!(
            SurveyError::Registry {
                status: 503,
                message: "Service Unavailable".to_string(),
            }
            .severity(),
            ErrorSeverity::Medium
        );
    }

    #[test]
    fn test_validation_errors_are_not_retryable() {
        let err = SurveyError::InvalidCadastralNumber {
            value: "abc".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Validation);
        assert_eq!(err.severity(), ErrorSeverity::High);
        assert!(err.user_friendly_message().contains("abc"));
    }
}
