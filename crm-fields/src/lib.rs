//! Custom field registry for CRM records
//!
//! `crm-fields` lets administrators attach extra, typed attributes to records
//! of a content type (customers, companies, forms). It owns field and group
//! definitions and validates submitted values, but never stores the values
//! themselves. Record stores plug in through [`RecordValueStore`] and
//! [`ParentLookup`].
//!
//! # Architecture
//!
//! - **YAML on disk**: one file per field under `fields/`, one per group under `groups/`
//! - **Policy table**: [`FieldsConfig`] says which content types need an instance id or support groups
//! - **Operations**: each call is a struct implementing [`Execute`]; mutations yield a [`LogEntry`]
//! - **Audit**: [`FieldsOperationProcessor`] appends entries to `activity/current.jsonl`

pub mod config;
pub mod context;
pub mod error;
pub mod field;
pub mod group;
pub mod guard;
pub mod lookup;
pub mod operation;
pub mod processor;
pub mod storage;
pub mod types;
pub mod validation;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use config::{ContentTypePolicy, FieldsConfig, OrderScope};
pub use context::{FieldDefaults, FieldsContext, FieldsContextBuilder};
pub use error::{ErrorKind, FieldsError, Result};
pub use lookup::{ParentLookup, RecordValueStore};
pub use operation::{Execute, ExecutionResult, Operation, OperationProcessor};
pub use processor::FieldsOperationProcessor;
pub use types::{
    Field, FieldDoc, FieldGroup, FieldId, FieldPatch, FieldType, FieldValue, GroupDoc, GroupId,
    GroupPatch, LogEntry, LogEntryId,
};
pub use validation::{validate, Rejection, ValidationKind};
