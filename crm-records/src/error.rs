//! Error types for customer and form records

use crm_fields::{ErrorKind, FieldsError};
use thiserror::Error;

/// Result type for record operations
pub type Result<T> = std::result::Result<T, RecordsError>;

/// Errors that can occur in record operations
#[derive(Debug, Error)]
pub enum RecordsError {
    /// Field registry failure, including rejected custom values
    #[error(transparent)]
    Fields(#[from] FieldsError),

    /// Another customer already uses this email
    #[error("Duplicated email")]
    DuplicatedEmail { email: String },

    /// Forms must name their creator
    #[error("createdUser must be supplied")]
    CreatedUserRequired,

    #[error("Customer not found with id {id}")]
    CustomerNotFound { id: String },

    #[error("Form not found with id {id}")]
    FormNotFound { id: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML serialization error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl RecordsError {
    /// Classify this error the same way the field registry does
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Fields(e) => e.kind(),
            Self::DuplicatedEmail { .. } | Self::CreatedUserRequired => ErrorKind::Validation,
            Self::CustomerNotFound { .. } | Self::FormNotFound { .. } => ErrorKind::NotFound,
            Self::Io(_) | Self::Yaml(_) | Self::Json(_) => ErrorKind::Storage,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_errors_pass_through() {
        let err = RecordsError::from(FieldsError::invalid_value("Email", "Invalid email"));
        assert_eq!(err.to_string(), "Email: Invalid email");
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[test]
    fn record_errors_are_classified() {
        assert_eq!(
            RecordsError::FormNotFound { id: "f".into() }.kind(),
            ErrorKind::NotFound
        );
        assert_eq!(RecordsError::CreatedUserRequired.kind(), ErrorKind::Validation);
    }
}
