//! Collaborator interfaces consumed by the field registry.
//!
//! The registry never depends on concrete record types. Anything that stores
//! custom field values implements [`RecordValueStore`]; anything that owns
//! content-type instances (forms, ...) implements [`ParentLookup`].

use async_trait::async_trait;

use crate::error::Result;

/// Resolves whether a content-type instance exists.
#[async_trait]
pub trait ParentLookup: Send + Sync {
    /// `Ok(false)` when the instance is unknown
    async fn exists(&self, content_type: &str, id: &str) -> Result<bool>;
}

/// A store of records carrying a field-id keyed value map.
#[async_trait]
pub trait RecordValueStore: Send + Sync {
    /// Remove `key` from the custom values of every record. Returns the number
    /// of records that changed.
    async fn remove_key_everywhere(&self, key: &str) -> Result<usize>;
}
