//! RemoveField command

use crate::context::FieldsContext;
use crate::error::{FieldsError, Result};
use crate::guard::ensure_mutable;
use crate::operation::{Execute, ExecutionResult, Operation};
use crate::types::{Field, FieldId};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

/// Delete a user-defined field and scrub its stored values
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RemoveField {
    pub id: FieldId,
}

impl RemoveField {
    pub fn new(id: impl Into<FieldId>) -> Self {
        Self { id: id.into() }
    }

    pub async fn apply(&self, ctx: &FieldsContext) -> Result<Field> {
        let field = ctx.read_field(&self.id).await?;
        ensure_mutable(&field)?;
        purge(ctx, &field).await?;
        Ok(field)
    }
}

/// Remove `field` and every value stored under its id, without the
/// immutability guard.
///
/// Values go first; if scrubbing fails the field stays in place.
pub async fn purge(ctx: &FieldsContext, field: &Field) -> Result<()> {
    let scrubbed = ctx.scrub_values(field.id.as_str()).await?;
    ctx.delete_field_file(&field.id).await?;
    info!(id = %field.id, scrubbed, "removed field");
    Ok(())
}

impl Operation for RemoveField {
    fn verb(&self) -> &'static str {
        "remove"
    }

    fn noun(&self) -> &'static str {
        "field"
    }

    fn description(&self) -> &'static str {
        "Remove a custom field and its stored values"
    }
}

#[async_trait]
impl Execute<FieldsContext, FieldsError> for RemoveField {
    async fn execute(&self, ctx: &FieldsContext) -> ExecutionResult<Value, FieldsError> {
        let start = std::time::Instant::now();
        let input = serde_json::to_value(self).unwrap_or_default();

        let result: Result<Value> =
            async { Ok(serde_json::to_value(self.apply(ctx).await?)?) }.await;

        ExecutionResult::logged(self.op_string(), input, None, start, result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::field::CreateField;
    use crate::lookup::RecordValueStore;
    use crate::test_support::setup;
    use crate::types::{FieldDoc, FieldValue};
    use async_trait::async_trait;
    use std::collections::BTreeMap;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_remove_field_scrubs_values() {
        let store = setup().await;
        let ctx = &store.ctx;
        let field = CreateField::new(FieldDoc::new("customer"))
            .apply(ctx)
            .await
            .unwrap();
        let other = CreateField::new(FieldDoc::new("customer"))
            .apply(ctx)
            .await
            .unwrap();

        store.records.insert(
            "customer1",
            BTreeMap::from([
                (field.id.to_string(), FieldValue::from("1231")),
                (other.id.to_string(), FieldValue::from("keep")),
            ]),
        );

        let removed = RemoveField::new(field.id.clone()).apply(ctx).await.unwrap();

        assert_eq!(removed.id, field.id);
        assert_eq!(store.records.count_with_key(field.id.as_str()), 0);
        assert_eq!(store.records.count_with_key(other.id.as_str()), 1);
        assert!(ctx.find_field(&field.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_remove_unknown_field() {
        let store = setup().await;
        let err = RemoveField::new("DFFFDSFD")
            .apply(&store.ctx)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(err.to_string(), "Field not found with id DFFFDSFD");
    }

    #[tokio::test]
    async fn test_remove_system_field_rejected() {
        let store = setup().await;
        let ctx = &store.ctx;
        let field = CreateField::new(FieldDoc::new("customer").defined_by_erxes())
            .apply(ctx)
            .await
            .unwrap();

        let err = RemoveField::new(field.id.clone()).apply(ctx).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Immutable);
        assert!(ctx.find_field(&field.id).await.unwrap().is_some());
    }

    struct FailingStore;

    #[async_trait]
    impl RecordValueStore for FailingStore {
        async fn remove_key_everywhere(&self, _key: &str) -> Result<usize> {
            Err(FieldsError::store("customers unavailable"))
        }
    }

    #[tokio::test]
    async fn test_failed_scrub_keeps_field() {
        let store = setup().await;
        let ctx = FieldsContext::open(store.temp.path().join("failing"))
            .with_record_store(Arc::new(FailingStore))
            .build()
            .await
            .unwrap();
        let field = CreateField::new(FieldDoc::new("customer"))
            .apply(&ctx)
            .await
            .unwrap();

        let err = RemoveField::new(field.id.clone()).apply(&ctx).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Storage);
        assert!(ctx.find_field(&field.id).await.unwrap().is_some());
    }
}
