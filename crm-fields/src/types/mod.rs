//! Core types for the custom field registry.
//!
//! Fields and groups serialize to YAML on disk and to camelCase JSON at the
//! operation boundary. Submitted values are a loose union, validated only at
//! write time.

mod field;
mod group;
mod ids;
mod log;
mod value;

pub use field::{Field, FieldDoc, FieldPatch, FieldType};
pub use group::{FieldGroup, GroupDoc, GroupPatch};
pub use ids::{FieldId, GroupId, LogEntryId};
pub use log::LogEntry;
pub use value::FieldValue;

/// Deserialize helper distinguishing an absent key (`None`) from an explicit
/// `null` (`Some(None)`) in partial updates.
pub(crate) mod double_option {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<T, S>(value: &Option<Option<T>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        T: Serialize,
        S: Serializer,
    {
        match value {
            Some(inner) => inner.serialize(serializer),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
    where
        T: Deserialize<'de>,
        D: Deserializer<'de>,
    {
        Option::<T>::deserialize(deserializer).map(Some)
    }
}
