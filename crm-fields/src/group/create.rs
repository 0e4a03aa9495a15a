//! CreateGroup command

use crate::context::FieldsContext;
use crate::error::{FieldsError, Result};
use crate::operation::{Execute, ExecutionResult, Operation};
use crate::types::{FieldGroup, GroupDoc};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

/// Create a group after the last group of its content type
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CreateGroup {
    #[serde(flatten)]
    pub doc: GroupDoc,
}

impl CreateGroup {
    pub fn new(doc: GroupDoc) -> Self {
        Self { doc }
    }

    pub async fn apply(&self, ctx: &FieldsContext) -> Result<FieldGroup> {
        let policy = ctx.policy(&self.doc.content_type)?;
        if !policy.supports_grouping {
            return Err(FieldsError::GroupingNotSupported {
                name: self.doc.content_type.clone(),
            });
        }

        let _ordering = ctx.lock_ordering().await;
        let max = ctx
            .read_all_groups()
            .await?
            .iter()
            .filter(|g| g.content_type == self.doc.content_type)
            .map(|g| g.order)
            .max();
        let order = match max {
            Some(max) => max
                .checked_add(1)
                .ok_or(FieldsError::OrderOverflow { max })?,
            None => 1,
        };

        let group = self.doc.clone().into_group(order);
        ctx.write_group(&group).await?;
        debug!(id = %group.id, content_type = %group.content_type, order, "created group");
        Ok(group)
    }
}

impl Operation for CreateGroup {
    fn verb(&self) -> &'static str {
        "create"
    }

    fn noun(&self) -> &'static str {
        "group"
    }

    fn description(&self) -> &'static str {
        "Create a field group"
    }
}

#[async_trait]
impl Execute<FieldsContext, FieldsError> for CreateGroup {
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
    use crate::group::UpdateGroup;
    use crate::test_support::setup;
    use crate::types::GroupPatch;

    #[tokio::test]
    async fn test_orders_start_at_one() {
        let store = setup().await;
        let ctx = &store.ctx;

        let first = CreateGroup::new(GroupDoc::new("customer", "Basic"))
            .apply(ctx)
            .await
            .unwrap();
        let second = CreateGroup::new(GroupDoc::new("customer", "Extra"))
            .apply(ctx)
            .await
            .unwrap();
        let company = CreateGroup::new(GroupDoc::new("company", "Basic"))
            .apply(ctx)
            .await
            .unwrap();

        assert_eq!(first.order, 1);
        assert_eq!(second.order, 2);
        assert_eq!(company.order, 1);
        assert!(first.is_visible);
    }

    #[tokio::test]
    async fn test_form_has_no_groups() {
        let store = setup().await;
        let err = CreateGroup::new(GroupDoc::new("form", "Basic"))
            .apply(&store.ctx)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(matches!(err, FieldsError::GroupingNotSupported { .. }));
    }

    #[tokio::test]
    async fn test_order_overflow_is_rejected() {
        let store = setup().await;
        let ctx = &store.ctx;
        let group = CreateGroup::new(GroupDoc::new("customer", "Basic"))
            .apply(ctx)
            .await
            .unwrap();
        UpdateGroup::new(group.id.clone(), GroupPatch::new().with_order(i64::MAX))
            .apply(ctx)
            .await
            .unwrap();

        let err = CreateGroup::new(GroupDoc::new("customer", "Extra"))
            .apply(ctx)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(err.to_string(), format!("Order out of range after {}", i64::MAX));
        assert_eq!(ctx.read_all_groups().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_concurrent_creates_get_distinct_orders() {
        let store = setup().await;
        let ctx = &store.ctx;
        let ops: Vec<_> = (0..5)
            .map(|i| CreateGroup::new(GroupDoc::new("customer", format!("g{i}"))))
            .collect();

        let groups = create_concurrently(ctx, &ops).await;
        let mut orders: Vec<_> = groups.iter().map(|g| g.order).collect();
        orders.sort();
        assert_eq!(orders, vec![1, 2, 3, 4, 5]);
    }

    async fn create_concurrently(ctx: &FieldsContext, ops: &[CreateGroup]) -> Vec<FieldGroup> {
        let (a, b, c, d, e) = tokio::join!(
            ops[0].apply(ctx),
            ops[1].apply(ctx),
            ops[2].apply(ctx),
            ops[3].apply(ctx),
            ops[4].apply(ctx),
        );
        vec![a.unwrap(), b.unwrap(), c.unwrap(), d.unwrap(), e.unwrap()]
    }
}
