//! Error types for the custom field registry

use thiserror::Error;

/// Result type for field and group operations
pub type Result<T> = std::result::Result<T, FieldsError>;

/// Caller-facing classification of a [`FieldsError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed or missing input, including rejected field values
    Validation,
    /// A referenced field, group or parent instance does not exist
    NotFound,
    /// Mutation of a system-defined field or group
    Immutable,
    /// Storage or collaborator failure
    Storage,
}

/// Errors that can occur in field registry operations
#[derive(Debug, Error)]
pub enum FieldsError {
    /// A content type that needs an instance id was given none
    #[error("Content type id is required")]
    ContentTypeIdRequired,

    /// Content type missing from the policy table
    #[error("Unknown content type: {name}")]
    UnknownContentType { name: String },

    /// Group targeted at a content type without grouping support
    #[error("Content type {name} does not support groups")]
    GroupingNotSupported { name: String },

    /// A submitted value failed its field's validation rule
    #[error("{label}: {reason}")]
    InvalidValue { label: String, reason: String },

    /// No order is left after the current maximum in a scope
    #[error("Order out of range after {max}")]
    OrderOverflow { max: i64 },

    /// Field lookup by id failed
    #[error("Field not found with id {id}")]
    FieldNotFound { id: String },

    /// Field lookup failed while cleaning a submitted value
    #[error("Field not found with the _id of {id}")]
    SubmissionFieldNotFound { id: String },

    /// Group lookup by id failed
    #[error("Group not found with id of {id}")]
    GroupNotFound { id: String },

    /// The parent instance named by `contentTypeId` does not exist
    #[error("{parent} not found with _id of {id}")]
    ParentNotFound { parent: String, id: String },

    /// System-defined field
    #[error("Cant update this field")]
    ImmutableField { id: String },

    /// System-defined group
    #[error("Cant update this group")]
    ImmutableGroup { id: String },

    /// A collaborator (record store, parent lookup) failed
    #[error("store error: {message}")]
    Store { message: String },

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

impl FieldsError {
    /// Create a rejected-value error prefixed with the field label
    pub fn invalid_value(label: impl Into<String>, reason: impl ToString) -> Self {
        Self::InvalidValue {
            label: label.into(),
            reason: reason.to_string(),
        }
    }

    /// Wrap a collaborator failure
    pub fn store(message: impl Into<String>) -> Self {
        Self::Store {
            message: message.into(),
        }
    }

    /// Classify this error for the transport layer
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::ContentTypeIdRequired
            | Self::UnknownContentType { .. }
            | Self::GroupingNotSupported { .. }
            | Self::InvalidValue { .. }
            | Self::OrderOverflow { .. } => ErrorKind::Validation,
            Self::FieldNotFound { .. }
            | Self::SubmissionFieldNotFound { .. }
            | Self::GroupNotFound { .. }
            | Self::ParentNotFound { .. } => ErrorKind::NotFound,
            Self::ImmutableField { .. } | Self::ImmutableGroup { .. } => ErrorKind::Immutable,
            Self::Store { .. } | Self::Io(_) | Self::Yaml(_) | Self::Json(_) => ErrorKind::Storage,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_messages_carry_id() {
        let err = FieldsError::FieldNotFound {
            id: "DFFFDSFD".into(),
        };
        assert_eq!(err.to_string(), "Field not found with id DFFFDSFD");
        assert_eq!(err.kind(), ErrorKind::NotFound);

        let err = FieldsError::GroupNotFound {
            id: "1333131".into(),
        };
        assert_eq!(err.to_string(), "Group not found with id of 1333131");

        let err = FieldsError::ParentNotFound {
            parent: "Form".into(),
            id: "DFAFDFADS".into(),
        };
        assert_eq!(err.to_string(), "Form not found with _id of DFAFDFADS");
    }

    #[test]
    fn test_invalid_value_prefixes_label() {
        let err = FieldsError::invalid_value("Age", "Invalid number");
        assert_eq!(err.to_string(), "Age: Invalid number");
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[test]
    fn test_immutable_kind() {
        let err = FieldsError::ImmutableGroup { id: "g".into() };
        assert_eq!(err.to_string(), "Cant update this group");
        assert_eq!(err.kind(), ErrorKind::Immutable);
    }
}
