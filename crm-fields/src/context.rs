//! FieldsContext - storage primitives for fields and groups
//!
//! The context owns a directory on disk and the collaborator handles. It
//! provides data access only; operations do the work.
//!
//! ```text
//! root/
//!   config.yaml        ← optional content-type policy table
//!   fields/            ← one .yaml per field
//!   groups/            ← one .yaml per group
//!   activity/
//!     current.jsonl    ← audit log, one entry per line
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::sync::{Mutex, MutexGuard};
use tracing::debug;

use crate::config::{ContentTypePolicy, FieldsConfig};
use crate::error::{FieldsError, Result};
use crate::lookup::{ParentLookup, RecordValueStore};
use crate::storage;
use crate::types::{Field, FieldGroup, FieldId, GroupId, LogEntry};

/// System-defined fields and groups seeded on open.
///
/// Entries are matched by id: anything already on disk (even if edited) is
/// left alone.
pub struct FieldDefaults {
    fields: Vec<Field>,
    groups: Vec<FieldGroup>,
}

impl FieldDefaults {
    pub fn new() -> Self {
        Self {
            fields: Vec::new(),
            groups: Vec::new(),
        }
    }

    /// Add a default field. It is always stored as system-defined.
    pub fn field(mut self, mut def: Field) -> Self {
        def.is_defined_by_erxes = true;
        self.fields.push(def);
        self
    }

    /// Add a default group. It is always stored as system-defined.
    pub fn group(mut self, mut def: FieldGroup) -> Self {
        def.is_defined_by_erxes = true;
        self.groups.push(def);
        self
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn groups(&self) -> &[FieldGroup] {
        &self.groups
    }
}

impl Default for FieldDefaults {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for `FieldsContext`. Created by `FieldsContext::open()`.
pub struct FieldsContextBuilder {
    root: PathBuf,
    config: Option<FieldsConfig>,
    defaults: Option<FieldDefaults>,
    parents: Vec<Arc<dyn ParentLookup>>,
    record_stores: Vec<Arc<dyn RecordValueStore>>,
}

impl FieldsContextBuilder {
    /// Use this policy table instead of `config.yaml` or the built-ins.
    pub fn with_config(mut self, config: FieldsConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Seed system-defined fields and groups on open.
    pub fn with_defaults(mut self, defaults: FieldDefaults) -> Self {
        self.defaults = Some(defaults);
        self
    }

    /// Register a resolver for content-type instance ids.
    pub fn with_parent_lookup(mut self, lookup: Arc<dyn ParentLookup>) -> Self {
        self.parents.push(lookup);
        self
    }

    /// Register a store whose records carry custom field values.
    pub fn with_record_store(mut self, store: Arc<dyn RecordValueStore>) -> Self {
        self.record_stores.push(store);
        self
    }

    /// Build the context: create directories, load config, seed defaults.
    pub async fn build(self) -> Result<FieldsContext> {
        let root = self.root;
        fs::create_dir_all(root.join("fields")).await?;
        fs::create_dir_all(root.join("groups")).await?;
        fs::create_dir_all(root.join("activity")).await?;

        let config = match self.config {
            Some(config) => config,
            None => FieldsConfig::load_or_default(&root.join("config.yaml")).await?,
        };

        let ctx = FieldsContext {
            root,
            config,
            parents: self.parents,
            record_stores: self.record_stores,
            order_lock: Mutex::new(()),
        };

        if let Some(defaults) = self.defaults {
            ctx.seed_defaults(&defaults).await?;
        }

        debug!(
            root = %ctx.root.display(),
            content_types = ctx.config.content_types.len(),
            record_stores = ctx.record_stores.len(),
            "fields context opened"
        );

        Ok(ctx)
    }
}

/// Context passed to every field and group operation.
pub struct FieldsContext {
    root: PathBuf,
    config: FieldsConfig,
    parents: Vec<Arc<dyn ParentLookup>>,
    record_stores: Vec<Arc<dyn RecordValueStore>>,
    order_lock: Mutex<()>,
}

impl FieldsContext {
    /// Open or create a store directory. Returns a builder for collaborators
    /// and configuration.
    ///
    /// ```rust,ignore
    /// let ctx = FieldsContext::open(path)
    ///     .with_parent_lookup(forms.clone())
    ///     .with_record_store(customers.clone())
    ///     .build()
    ///     .await?;
    /// ```
    pub fn open(root: impl Into<PathBuf>) -> FieldsContextBuilder {
        FieldsContextBuilder {
            root: root.into(),
            config: None,
            defaults: None,
            parents: Vec::new(),
            record_stores: Vec::new(),
        }
    }

    // =========================================================================
    // Paths and configuration
    // =========================================================================

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config(&self) -> &FieldsConfig {
        &self.config
    }

    pub fn policy(&self, content_type: &str) -> Result<&ContentTypePolicy> {
        self.config.policy(content_type)
    }

    fn fields_dir(&self) -> PathBuf {
        self.root.join("fields")
    }

    fn groups_dir(&self) -> PathBuf {
        self.root.join("groups")
    }

    /// Path to the global activity log
    pub fn activity_path(&self) -> PathBuf {
        self.root.join("activity").join("current.jsonl")
    }

    // =========================================================================
    // Field I/O
    // =========================================================================

    /// Read a field, failing with `FieldNotFound`
    pub async fn read_field(&self, id: &FieldId) -> Result<Field> {
        self.find_field(id)
            .await?
            .ok_or_else(|| FieldsError::FieldNotFound { id: id.to_string() })
    }

    pub async fn find_field(&self, id: &FieldId) -> Result<Option<Field>> {
        storage::read_yaml(self.fields_dir(), id.as_str()).await
    }

    /// Write (create or replace) a field
    pub async fn write_field(&self, field: &Field) -> Result<()> {
        let path = storage::entity_path(self.fields_dir(), field.id.as_str())
            .ok_or_else(|| FieldsError::FieldNotFound {
                id: field.id.to_string(),
            })?;
        let yaml = serde_yaml_ng::to_string(field)?;
        storage::atomic_write(&path, yaml.as_bytes()).await
    }

    pub async fn delete_field_file(&self, id: &FieldId) -> Result<()> {
        storage::remove_yaml(self.fields_dir(), id.as_str()).await
    }

    /// Read every field. Unreadable files are skipped with a warning.
    pub async fn read_all_fields(&self) -> Result<Vec<Field>> {
        storage::read_all_yaml(&self.fields_dir()).await
    }

    // =========================================================================
    // Group I/O
    // =========================================================================

    /// Read a group, failing with `GroupNotFound`
    pub async fn read_group(&self, id: &GroupId) -> Result<FieldGroup> {
        self.find_group(id)
            .await?
            .ok_or_else(|| FieldsError::GroupNotFound { id: id.to_string() })
    }

    pub async fn find_group(&self, id: &GroupId) -> Result<Option<FieldGroup>> {
        storage::read_yaml(self.groups_dir(), id.as_str()).await
    }

    pub async fn write_group(&self, group: &FieldGroup) -> Result<()> {
        let path = storage::entity_path(self.groups_dir(), group.id.as_str())
            .ok_or_else(|| FieldsError::GroupNotFound {
                id: group.id.to_string(),
            })?;
        let yaml = serde_yaml_ng::to_string(group)?;
        storage::atomic_write(&path, yaml.as_bytes()).await
    }

    pub async fn delete_group_file(&self, id: &GroupId) -> Result<()> {
        storage::remove_yaml(self.groups_dir(), id.as_str()).await
    }

    pub async fn read_all_groups(&self) -> Result<Vec<FieldGroup>> {
        storage::read_all_yaml(&self.groups_dir()).await
    }

    // =========================================================================
    // Ordering
    // =========================================================================

    /// Serialize read-max/write-max+1 sequences within this process.
    ///
    /// Other processes sharing the directory are not excluded.
    pub async fn lock_ordering(&self) -> MutexGuard<'_, ()> {
        self.order_lock.lock().await
    }

    // =========================================================================
    // Collaborators
    // =========================================================================

    /// Ask every registered resolver whether the instance exists.
    pub async fn parent_exists(&self, content_type: &str, id: &str) -> Result<bool> {
        for lookup in &self.parents {
            if lookup.exists(content_type, id).await? {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Remove `key` from every registered record store. Returns the total
    /// number of records changed.
    pub async fn scrub_values(&self, key: &str) -> Result<usize> {
        let mut total = 0;
        for store in &self.record_stores {
            total += store.remove_key_everywhere(key).await?;
        }
        Ok(total)
    }

    // =========================================================================
    // Activity logging
    // =========================================================================

    /// Append a log entry to the activity log
    pub async fn append_activity(&self, entry: &LogEntry) -> Result<()> {
        let mut line = serde_json::to_string(entry)?;
        line.push('\n');

        let mut file = fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(self.activity_path())
            .await?;

        file.write_all(line.as_bytes()).await?;
        file.flush().await?;
        Ok(())
    }

    /// Read activity entries, newest first
    pub async fn read_activity(&self, limit: Option<usize>) -> Result<Vec<LogEntry>> {
        let path = self.activity_path();
        if !path.exists() {
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(&path).await?;
        let mut entries: Vec<LogEntry> = content
            .lines()
            .filter(|line| !line.is_empty())
            .filter_map(|line| serde_json::from_str(line).ok())
            .collect();
        entries.reverse();

        if let Some(limit) = limit {
            entries.truncate(limit);
        }
        Ok(entries)
    }

    // =========================================================================
    // Seeding
    // =========================================================================

    async fn seed_defaults(&self, defaults: &FieldDefaults) -> Result<()> {
        for group in defaults.groups() {
            if self.find_group(&group.id).await?.is_none() {
                self.write_group(group).await?;
                debug!(name = %group.name, id = %group.id, "seeded default group");
            }
        }
        for field in defaults.fields() {
            if self.find_field(&field.id).await?.is_none() {
                self.write_field(field).await?;
                debug!(text = %field.text, id = %field.id, "seeded default field");
            }
        }
        Ok(())
    }
}
