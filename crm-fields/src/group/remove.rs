//! RemoveGroup command

use crate::context::FieldsContext;
use crate::error::{FieldsError, Result};
use crate::field::purge;
use crate::guard::ensure_mutable;
use crate::operation::{Execute, ExecutionResult, Operation};
use crate::types::GroupId;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

/// Delete a user-defined group together with all of its fields
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RemoveGroup {
    pub id: GroupId,
}

impl RemoveGroup {
    pub fn new(id: impl Into<GroupId>) -> Self {
        Self { id: id.into() }
    }

    /// Member fields are purged whether or not they are system-defined.
    pub async fn apply(&self, ctx: &FieldsContext) -> Result<()> {
        let group = ctx.read_group(&self.id).await?;
        ensure_mutable(&group)?;

        let members: Vec<_> = ctx
            .read_all_fields()
            .await?
            .into_iter()
            .filter(|f| f.group_id.as_ref() == Some(&group.id))
            .collect();
        for field in &members {
            purge(ctx, field).await?;
        }

        ctx.delete_group_file(&group.id).await?;
        info!(id = %group.id, fields = members.len(), "removed group");
        Ok(())
    }
}

impl Operation for RemoveGroup {
    fn verb(&self) -> &'static str {
        "remove"
    }

    fn noun(&self) -> &'static str {
        "group"
    }

    fn description(&self) -> &'static str {
        "Remove a field group and its fields"
    }
}

#[async_trait]
impl Execute<FieldsContext, FieldsError> for RemoveGroup {
    async fn execute(&self, ctx: &FieldsContext) -> ExecutionResult<Value, FieldsError> {
        let start = std::time::Instant::now();
        let input = serde_json::to_value(self).unwrap_or_default();

        let result: Result<Value> = self.apply(ctx).await.map(|()| Value::Null);

        ExecutionResult::logged(self.op_string(), input, None, start, result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::field::CreateField;
    use crate::group::CreateGroup;
    use crate::test_support::setup;
    use crate::types::{FieldDoc, FieldValue, GroupDoc};
    use std::collections::BTreeMap;

    #[tokio::test]
    async fn test_remove_group_cascades() {
        let store = setup().await;
        let ctx = &store.ctx;
        let group = CreateGroup::new(GroupDoc::new("customer", "Basic"))
            .apply(ctx)
            .await
            .unwrap();
        let member = CreateField::new(FieldDoc::new("customer").with_group(group.id.clone()))
            .apply(ctx)
            .await
            .unwrap();
        let system_member = CreateField::new(
            FieldDoc::new("customer")
                .with_group(group.id.clone())
                .defined_by_erxes(),
        )
        .apply(ctx)
        .await
        .unwrap();
        let outsider = CreateField::new(FieldDoc::new("customer"))
            .apply(ctx)
            .await
            .unwrap();
        store.records.insert(
            "c1",
            BTreeMap::from([
                (member.id.to_string(), FieldValue::from("a")),
                (outsider.id.to_string(), FieldValue::from("b")),
            ]),
        );

        RemoveGroup::new(group.id.clone()).apply(ctx).await.unwrap();

        assert!(ctx.find_field(&member.id).await.unwrap().is_none());
        assert!(ctx.find_field(&system_member.id).await.unwrap().is_none());
        assert!(ctx.find_field(&outsider.id).await.unwrap().is_some());
        assert_eq!(store.records.count_with_key(member.id.as_str()), 0);
        assert_eq!(store.records.count_with_key(outsider.id.as_str()), 1);
        let err = ctx.read_group(&group.id).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_system_group_kept() {
        let store = setup().await;
        let ctx = &store.ctx;
        let group = CreateGroup::new(GroupDoc::new("customer", "Basic").defined_by_erxes())
            .apply(ctx)
            .await
            .unwrap();
        let member = CreateField::new(FieldDoc::new("customer").with_group(group.id.clone()))
            .apply(ctx)
            .await
            .unwrap();

        let err = RemoveGroup::new(group.id.clone()).apply(ctx).await.unwrap_err();
        assert_eq!(err.to_string(), "Cant update this group");
        assert!(ctx.find_field(&member.id).await.unwrap().is_some());
        assert!(ctx.read_group(&group.id).await.is_ok());
    }

    #[tokio::test]
    async fn test_unknown_group() {
        let store = setup().await;
        let err = RemoveGroup::new("DFAFDSFDSFDSF")
            .apply(&store.ctx)
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Group not found with id of DFAFDSFDSFDSF");
    }
}
