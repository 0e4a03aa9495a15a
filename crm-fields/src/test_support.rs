//! In-memory collaborators and a temp-dir backed context for tests.

use std::collections::{BTreeMap, HashSet};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tempfile::TempDir;

use crate::context::FieldsContext;
use crate::error::Result;
use crate::lookup::{ParentLookup, RecordValueStore};
use crate::types::FieldValue;

/// Parent instances keyed by (content type, id)
#[derive(Debug, Default)]
pub struct MemoryParents {
    known: Mutex<HashSet<(String, String)>>,
}

impl MemoryParents {
    pub fn add(&self, content_type: &str, id: &str) {
        self.known
            .lock()
            .unwrap()
            .insert((content_type.to_string(), id.to_string()));
    }
}

#[async_trait]
impl ParentLookup for MemoryParents {
    async fn exists(&self, content_type: &str, id: &str) -> Result<bool> {
        Ok(self
            .known
            .lock()
            .unwrap()
            .contains(&(content_type.to_string(), id.to_string())))
    }
}

/// Records as plain value maps keyed by record id
#[derive(Debug, Default)]
pub struct MemoryRecords {
    records: Mutex<BTreeMap<String, BTreeMap<String, FieldValue>>>,
}

impl MemoryRecords {
    pub fn insert(&self, record_id: &str, values: BTreeMap<String, FieldValue>) {
        self.records
            .lock()
            .unwrap()
            .insert(record_id.to_string(), values);
    }

    /// Number of records that still carry `key`
    pub fn count_with_key(&self, key: &str) -> usize {
        self.records
            .lock()
            .unwrap()
            .values()
            .filter(|values| values.contains_key(key))
            .count()
    }

    pub fn get(&self, record_id: &str) -> Option<BTreeMap<String, FieldValue>> {
        self.records.lock().unwrap().get(record_id).cloned()
    }
}

#[async_trait]
impl RecordValueStore for MemoryRecords {
    async fn remove_key_everywhere(&self, key: &str) -> Result<usize> {
        let mut records = self.records.lock().unwrap();
        Ok(records
            .values_mut()
            .filter_map(|values| values.remove(key))
            .count())
    }
}

/// A context on a temp dir wired to in-memory collaborators
pub struct TestStore {
    pub ctx: FieldsContext,
    pub parents: Arc<MemoryParents>,
    pub records: Arc<MemoryRecords>,
    pub temp: TempDir,
}

pub async fn setup() -> TestStore {
    let temp = TempDir::new().unwrap();
    let parents = Arc::new(MemoryParents::default());
    let records = Arc::new(MemoryRecords::default());
    let ctx = FieldsContext::open(temp.path().join("store"))
        .with_parent_lookup(parents.clone())
        .with_record_store(records.clone())
        .build()
        .await
        .unwrap();
    TestStore {
        ctx,
        parents,
        records,
        temp,
    }
}
