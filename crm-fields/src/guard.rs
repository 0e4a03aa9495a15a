//! Immutability guard for system-defined entities

use crate::error::{FieldsError, Result};
use crate::types::{Field, FieldGroup};

/// An entity that may be seeded by the platform and locked against edits
pub trait SystemDefined {
    fn is_system_defined(&self) -> bool;

    fn immutable_error(&self) -> FieldsError;
}

impl SystemDefined for Field {
    fn is_system_defined(&self) -> bool {
        self.is_defined_by_erxes
    }

    fn immutable_error(&self) -> FieldsError {
        FieldsError::ImmutableField {
            id: self.id.to_string(),
        }
    }
}

impl SystemDefined for FieldGroup {
    fn is_system_defined(&self) -> bool {
        self.is_defined_by_erxes
    }

    fn immutable_error(&self) -> FieldsError {
        FieldsError::ImmutableGroup {
            id: self.id.to_string(),
        }
    }
}

/// Called by every update, visibility and removal entry point.
pub fn ensure_mutable<T: SystemDefined>(entity: &T) -> Result<()> {
    if entity.is_system_defined() {
        return Err(entity.immutable_error());
    }
    Ok(())
}
