use thiserror::Error;

use crate::core::intake::FieldError;

#[derive(Error, Debug)]
pub enum DeskError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Zip operation failed: {0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration field: {field}")]
    MissingConfigError { field: String },

    #[error("Intake request rejected ({} field error(s))", errors.len())]
    IntakeRejected { errors: Vec<FieldError> },

    #[error("Registration rejected ({} field error(s))", errors.len())]
    RegistrationRejected { errors: Vec<FieldError> },

    #[error("Appointment {tracking_id} is locked for management changes")]
    AppointmentLocked { tracking_id: String },

    #[error("{entity} not found: {key}")]
    NotFound { entity: String, key: String },

    #[error("{field} already taken: {value}")]
    AlreadyRegistered { field: String, value: String },

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Account is deactivated: {email}")]
    AccountDisabled { email: String },

    #[error("Validation error: {message}")]
    ValidationError { message: String },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },
}

pub type Result<T> = std::result::Result<T, DeskError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Intake,
    Domain,
    Network,
    Data,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl DeskError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. } => ErrorCategory::Configuration,
            Self::IntakeRejected { .. }
            | Self::RegistrationRejected { .. }
            | Self::ValidationError { .. } => ErrorCategory::Intake,
            Self::AppointmentLocked { .. }
            | Self::NotFound { .. }
            | Self::AlreadyRegistered { .. }
            | Self::InvalidCredentials
            | Self::AccountDisabled { .. } => ErrorCategory::Domain,
            Self::HttpError(_) => ErrorCategory::Network,
            Self::SerializationError(_) | Self::CsvError(_) | Self::ZipError(_) => {
                ErrorCategory::Data
            }
            Self::IoError(_) | Self::ProcessingError { .. } => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::IntakeRejected { .. }
            | Self::RegistrationRejected { .. }
            | Self::ValidationError { .. } => ErrorSeverity::Low,
            Self::HttpError(_) => ErrorSeverity::Medium,
            Self::AppointmentLocked { .. }
            | Self::NotFound { .. }
            | Self::AlreadyRegistered { .. }
            | Self::InvalidCredentials
            | Self::AccountDisabled { .. } => ErrorSeverity::Medium,
            Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. }
            | Self::SerializationError(_)
            | Self::CsvError(_)
            | Self::ZipError(_)
            | Self::ProcessingError { .. } => ErrorSeverity::High,
            Self::IoError(_) => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            Self::ConfigValidationError { field, .. }
            | Self::InvalidConfigValueError { field, .. }
            | Self::MissingConfigError { field } => {
                format!("Check the '{}' section of your desk.toml", field)
            }
            Self::IntakeRejected { .. } | Self::RegistrationRejected { .. } => {
                "Fix the reported fields in the request and resubmit".to_string()
            }
            Self::AppointmentLocked { .. } => {
                "Locked appointments cannot be edited; open a new appointment instead".to_string()
            }
            Self::NotFound { entity, .. } => {
                format!("Double-check the {} identifier", entity.to_lowercase())
            }
            Self::AlreadyRegistered { field, .. } => {
                format!("Pick a different {}", field)
            }
            Self::InvalidCredentials => "Verify the password and try again".to_string(),
            Self::AccountDisabled { .. } => {
                "Ask a staff member to reactivate the account".to_string()
            }
            Self::HttpError(_) => {
                "Check the webhook endpoint and network connectivity".to_string()
            }
            Self::IoError(_) => "Check file permissions and available disk space".to_string(),
            _ => "Re-run with --verbose for more detail".to_string(),
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::IntakeRejected { errors } => field_error_lines("The booking request was rejected:", errors),
            Self::RegistrationRejected { errors } => {
                field_error_lines("The registration was rejected:", errors)
            }
            Self::AppointmentLocked { tracking_id } => format!(
                "Appointment {} was marked completed, rejected, or already has parts ordered and can no longer be changed.",
                tracking_id
            ),
            other => other.to_string(),
        }
    }
}

fn field_error_lines(heading: &str, errors: &[FieldError]) -> String {
    let mut lines = vec![heading.to_string()];
    for err in errors {
        lines.push(format!("  - {}: {}", err.field, err.message));
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intake_rejection_is_low_severity() {
        let err = DeskError::IntakeRejected { errors: vec![] };
        assert_eq!(err.severity(), ErrorSeverity::Low);
        assert_eq!(err.category(), ErrorCategory::Intake);
    }

    #[test]
    fn friendly_message_lists_field_errors() {
        let err = DeskError::IntakeRejected {
            errors: vec![FieldError::new("service_type", "not available")],
        };
        let msg = err.user_friendly_message();
        assert!(msg.contains("service_type"));
        assert!(msg.contains("not available"));
    }
}
