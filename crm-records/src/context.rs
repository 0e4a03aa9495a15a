//! RecordsContext - YAML storage for customers and forms
//!
//! ```text
//! root/
//!   customers/   ← one .yaml per customer
//!   forms/       ← one .yaml per form
//! ```
//!
//! [`CrmContext`] pairs a records store with the field registry it feeds.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use crm_fields::config::content_types;
use crm_fields::storage;
use crm_fields::{FieldId, FieldsContext, FieldsContextBuilder, FieldsError, ParentLookup, RecordValueStore};
use tokio::fs;
use tokio::sync::{Mutex, MutexGuard};
use tracing::debug;

use crate::error::{RecordsError, Result};
use crate::types::{Customer, CustomerId, Form, FormId};

/// File-backed customer and form storage
pub struct RecordsContext {
    root: PathBuf,
    customer_lock: Mutex<()>,
}

impl RecordsContext {
    /// Open or create a records directory
    pub async fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        fs::create_dir_all(root.join("customers")).await?;
        fs::create_dir_all(root.join("forms")).await?;
        Ok(Self {
            root,
            customer_lock: Mutex::new(()),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn customers_dir(&self) -> PathBuf {
        self.root.join("customers")
    }

    fn forms_dir(&self) -> PathBuf {
        self.root.join("forms")
    }

    /// Held across read-check-write sequences on customers.
    pub async fn lock_customers(&self) -> MutexGuard<'_, ()> {
        self.customer_lock.lock().await
    }

    // =========================================================================
    // Customers
    // =========================================================================

    pub async fn read_customer(&self, id: &CustomerId) -> Result<Customer> {
        storage::read_yaml(self.customers_dir(), id.as_str())
            .await?
            .ok_or_else(|| RecordsError::CustomerNotFound { id: id.to_string() })
    }

    pub async fn write_customer(&self, customer: &Customer) -> Result<()> {
        let path = storage::entity_path(self.customers_dir(), customer.id.as_str()).ok_or_else(
            || RecordsError::CustomerNotFound {
                id: customer.id.to_string(),
            },
        )?;
        storage::atomic_write(&path, serde_yaml_ng::to_string(customer)?.as_bytes()).await?;
        Ok(())
    }

    pub async fn read_all_customers(&self) -> Result<Vec<Customer>> {
        Ok(storage::read_all_yaml(&self.customers_dir()).await?)
    }

    // =========================================================================
    // Forms
    // =========================================================================

    pub async fn find_form(&self, id: &FormId) -> Result<Option<Form>> {
        Ok(storage::read_yaml(self.forms_dir(), id.as_str()).await?)
    }

    pub async fn read_form(&self, id: &FormId) -> Result<Form> {
        self.find_form(id)
            .await?
            .ok_or_else(|| RecordsError::FormNotFound { id: id.to_string() })
    }

    pub async fn write_form(&self, form: &Form) -> Result<()> {
        let path = storage::entity_path(self.forms_dir(), form.id.as_str())
            .ok_or_else(|| RecordsError::FormNotFound {
                id: form.id.to_string(),
            })?;
        storage::atomic_write(&path, serde_yaml_ng::to_string(form)?.as_bytes()).await?;
        Ok(())
    }

    pub async fn delete_form_file(&self, id: &FormId) -> Result<()> {
        Ok(storage::remove_yaml(self.forms_dir(), id.as_str()).await?)
    }

    pub async fn read_all_forms(&self) -> Result<Vec<Form>> {
        Ok(storage::read_all_yaml(&self.forms_dir()).await?)
    }

    async fn scrub_customers(&self, key: &FieldId) -> Result<usize> {
        let _guard = self.lock_customers().await;
        let mut changed = 0;
        for mut customer in self.read_all_customers().await? {
            if customer.custom_fields_data.shift_remove(key).is_some() {
                self.write_customer(&customer).await?;
                changed += 1;
            }
        }
        Ok(changed)
    }
}

#[async_trait]
impl RecordValueStore for RecordsContext {
    async fn remove_key_everywhere(&self, key: &str) -> crm_fields::Result<usize> {
        let changed = self
            .scrub_customers(&FieldId::from(key))
            .await
            .map_err(|e| FieldsError::store(e.to_string()))?;
        debug!(key, changed, "scrubbed customer values");
        Ok(changed)
    }
}

#[async_trait]
impl ParentLookup for RecordsContext {
    async fn exists(&self, content_type: &str, id: &str) -> crm_fields::Result<bool> {
        if content_type != content_types::FORM {
            return Ok(false);
        }
        self.find_form(&FormId::from(id))
            .await
            .map(|form| form.is_some())
            .map_err(|e| FieldsError::store(e.to_string()))
    }
}

/// Field registry and record storage sharing one root.
///
/// ```text
/// root/
///   fields/    ← FieldsContext
///   records/   ← RecordsContext
/// ```
pub struct CrmContext {
    pub fields: FieldsContext,
    pub records: Arc<RecordsContext>,
}

impl CrmContext {
    /// Open both stores with the built-in content-type policies.
    pub async fn open(root: impl AsRef<Path>) -> Result<Self> {
        Self::open_with(root, |builder| builder).await
    }

    /// Open both stores, letting the caller adjust the field registry
    /// (config, defaults, extra collaborators) before it is built.
    pub async fn open_with<F>(root: impl AsRef<Path>, configure: F) -> Result<Self>
    where
        F: FnOnce(FieldsContextBuilder) -> FieldsContextBuilder,
    {
        let root = root.as_ref();
        let records = Arc::new(RecordsContext::open(root.join("records")).await?);
        let builder = FieldsContext::open(root.join("fields"))
            .with_parent_lookup(records.clone())
            .with_record_store(records.clone());
        let fields = configure(builder).build().await?;
        Ok(Self { fields, records })
    }
}
