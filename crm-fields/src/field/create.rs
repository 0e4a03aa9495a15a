//! CreateField command

use crate::config::OrderScope;
use crate::context::FieldsContext;
use crate::error::{FieldsError, Result};
use crate::operation::{Execute, ExecutionResult, Operation};
use crate::types::{Field, FieldDoc, GroupId};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

/// Create a field at the end of its ordering scope
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CreateField {
    #[serde(flatten)]
    pub doc: FieldDoc,
}

impl CreateField {
    pub fn new(doc: FieldDoc) -> Self {
        Self { doc }
    }

    pub async fn apply(&self, ctx: &FieldsContext) -> Result<Field> {
        let mut doc = self.doc.clone();
        let scope =
            check_placement(ctx, &doc.content_type, &mut doc.content_type_id, &mut doc.group_id)
                .await?;

        let _ordering = ctx.lock_ordering().await;
        let max = ctx
            .read_all_fields()
            .await?
            .iter()
            .filter(|f| {
                scope.contains(&f.content_type, f.content_type_id.as_deref(), f.group_id.as_ref())
            })
            .map(|f| f.order)
            .max();
        let order = match max {
            Some(max) => max
                .checked_add(1)
                .ok_or(FieldsError::OrderOverflow { max })?,
            None => 0,
        };

        let field = doc.into_field(order);
        ctx.write_field(&field).await?;
        debug!(id = %field.id, content_type = %field.content_type, order, "created field");
        Ok(field)
    }
}

/// Check where a field sits: known content type, instance id when the policy
/// needs one, existing parent, existing group of the same content type.
///
/// Ids the policy does not use are cleared. Returns the ordering scope.
pub(crate) async fn check_placement(
    ctx: &FieldsContext,
    content_type: &str,
    content_type_id: &mut Option<String>,
    group_id: &mut Option<GroupId>,
) -> Result<OrderScope> {
    let policy = ctx.policy(content_type)?;

    if !policy.requires_instance_id && content_type_id.take().is_some() {
        debug!(content_type, "ignoring content type id");
    }
    if !policy.supports_grouping && group_id.take().is_some() {
        debug!(content_type, "ignoring group id");
    }

    let scope = ctx.config().order_scope(
        content_type,
        content_type_id.as_deref(),
        group_id.as_ref(),
    )?;

    if let Some(instance_id) = content_type_id.as_deref() {
        if !ctx.parent_exists(content_type, instance_id).await? {
            return Err(FieldsError::ParentNotFound {
                parent: policy.parent_name().to_string(),
                id: instance_id.to_string(),
            });
        }
    }

    if let Some(group_id) = group_id.as_ref() {
        let group = ctx.read_group(group_id).await?;
        if group.content_type != content_type {
            return Err(FieldsError::GroupNotFound {
                id: group_id.to_string(),
            });
        }
    }

    Ok(scope)
}

impl Operation for CreateField {
    fn verb(&self) -> &'static str {
        "create"
    }

    fn noun(&self) -> &'static str {
        "field"
    }

    fn description(&self) -> &'static str {
        "Create a custom field"
    }
}

#[async_trait]
impl Execute<FieldsContext, FieldsError> for CreateField {
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
    use crate::field::UpdateFieldOrder;
    use crate::group::CreateGroup;
    use crate::test_support::setup;
    use crate::types::GroupDoc;

    #[tokio::test]
    async fn test_orders_within_group_scope() {
        let store = setup().await;
        let ctx = &store.ctx;
        let group = CreateGroup::new(GroupDoc::new("customer", "Basic"))
            .apply(ctx)
            .await
            .unwrap();

        for expected in 0..3 {
            let field = CreateField::new(FieldDoc::new("customer"))
                .apply(ctx)
                .await
                .unwrap();
            assert_eq!(field.order, expected);
        }

        let field = CreateField::new(FieldDoc::new("customer").with_group(group.id.clone()))
            .apply(ctx)
            .await
            .unwrap();
        assert_eq!(field.order, 0);
        assert_eq!(field.group_id, Some(group.id));
    }

    #[tokio::test]
    async fn test_orders_within_instance_scope() {
        let store = setup().await;
        let ctx = &store.ctx;
        store.parents.add("form", "form1");
        store.parents.add("form", "form2");

        let create = |id: &str| CreateField::new(FieldDoc::new("form").with_content_type_id(id));

        assert_eq!(create("form1").apply(ctx).await.unwrap().order, 0);
        assert_eq!(create("form1").apply(ctx).await.unwrap().order, 1);
        assert_eq!(create("form2").apply(ctx).await.unwrap().order, 0);
    }

    #[tokio::test]
    async fn test_instance_id_required() {
        let store = setup().await;
        let ctx = &store.ctx;
        let err = CreateField::new(FieldDoc::new("form"))
            .apply(ctx)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(err.to_string(), "Content type id is required");
    }

    #[tokio::test]
    async fn test_parent_must_exist() {
        let store = setup().await;
        let ctx = &store.ctx;
        let err = CreateField::new(FieldDoc::new("form").with_content_type_id("DFAFDFADS"))
            .apply(ctx)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(err.to_string(), "Form not found with _id of DFAFDFADS");
    }

    #[tokio::test]
    async fn test_unknown_group_rejected() {
        let store = setup().await;
        let ctx = &store.ctx;
        let err = CreateField::new(FieldDoc::new("customer").with_group("missing"))
            .apply(ctx)
            .await
            .unwrap_err();
        assert!(matches!(err, FieldsError::GroupNotFound { .. }));
    }

    #[tokio::test]
    async fn test_instance_id_ignored_for_customer() {
        let store = setup().await;
        let ctx = &store.ctx;
        let field = CreateField::new(FieldDoc::new("customer").with_content_type_id("c1"))
            .apply(ctx)
            .await
            .unwrap();
        assert_eq!(field.content_type_id, None);
    }

    #[tokio::test]
    async fn test_execute_logs_entry() {
        let store = setup().await;
        let ctx = &store.ctx;
        let (result, entry) = CreateField::new(FieldDoc::new("customer").with_text("Age"))
            .execute(ctx)
            .await
            .split();
        let value = result.unwrap();
        assert_eq!(value["text"], "Age");
        assert_eq!(value["order"], 0);
        assert_eq!(entry.unwrap().op, "create field");
    }

    #[tokio::test]
    async fn test_order_overflow_is_rejected() {
        let store = setup().await;
        let ctx = &store.ctx;
        let field = CreateField::new(FieldDoc::new("customer"))
            .apply(ctx)
            .await
            .unwrap();
        UpdateFieldOrder::new()
            .with(field.id.clone(), i64::MAX)
            .apply(ctx)
            .await
            .unwrap();

        let err = CreateField::new(FieldDoc::new("customer"))
            .apply(ctx)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(matches!(err, FieldsError::OrderOverflow { max: i64::MAX }));
        assert_eq!(ctx.read_all_fields().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_unknown_content_type() {
        let store = setup().await;
        let ctx = &store.ctx;
        let err = CreateField::new(FieldDoc::new("ticket"))
            .apply(ctx)
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Unknown content type: ticket");
    }
}
