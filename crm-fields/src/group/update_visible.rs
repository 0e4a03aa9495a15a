//! UpdateGroupVisible command

use crate::context::FieldsContext;
use crate::error::{FieldsError, Result};
use crate::guard::ensure_mutable;
use crate::operation::{Execute, ExecutionResult, Operation};
use crate::types::{FieldGroup, GroupId};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Show or hide a user-defined group, recording who did it
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateGroupVisible {
    pub id: GroupId,
    pub is_visible: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

impl UpdateGroupVisible {
    pub fn new(id: impl Into<GroupId>, is_visible: bool) -> Self {
        Self {
            id: id.into(),
            is_visible,
            user_id: None,
        }
    }

    pub fn by(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    pub async fn apply(&self, ctx: &FieldsContext) -> Result<FieldGroup> {
        let mut group = ctx.read_group(&self.id).await?;
        ensure_mutable(&group)?;

        group.is_visible = self.is_visible;
        if self.user_id.is_some() {
            group.last_updated_user_id = self.user_id.clone();
        }
        ctx.write_group(&group).await?;
        Ok(group)
    }
}

impl Operation for UpdateGroupVisible {
    fn verb(&self) -> &'static str {
        "toggle"
    }

    fn noun(&self) -> &'static str {
        "group"
    }

    fn description(&self) -> &'static str {
        "Show or hide a field group"
    }
}

#[async_trait]
impl Execute<FieldsContext, FieldsError> for UpdateGroupVisible {
    async fn execute(&self, ctx: &FieldsContext) -> ExecutionResult<Value, FieldsError> {
        let start = std::time::Instant::now();
        let input = serde_json::to_value(self).unwrap_or_default();

        let result: Result<Value> =
            async { Ok(serde_json::to_value(self.apply(ctx).await?)?) }.await;

        ExecutionResult::logged(self.op_string(), input, self.user_id.clone(), start, result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::group::CreateGroup;
    use crate::test_support::setup;
    use crate::types::GroupDoc;

    #[tokio::test]
    async fn test_hide_group() {
        let store = setup().await;
        let ctx = &store.ctx;
        let group = CreateGroup::new(GroupDoc::new("customer", "Basic"))
            .apply(ctx)
            .await
            .unwrap();

        let hidden = UpdateGroupVisible::new(group.id.clone(), false)
            .by("user1")
            .apply(ctx)
            .await
            .unwrap();
        assert!(!hidden.is_visible);
        assert_eq!(hidden.last_updated_user_id.as_deref(), Some("user1"));

        let shown = UpdateGroupVisible::new(group.id.clone(), true)
            .apply(ctx)
            .await
            .unwrap();
        assert!(shown.is_visible);
        assert_eq!(shown.last_updated_user_id.as_deref(), Some("user1"));
    }

    #[tokio::test]
    async fn test_system_group_locked() {
        let store = setup().await;
        let ctx = &store.ctx;
        let group = CreateGroup::new(GroupDoc::new("customer", "Basic").defined_by_erxes())
            .apply(ctx)
            .await
            .unwrap();
        let err = UpdateGroupVisible::new(group.id.clone(), false)
            .apply(ctx)
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Cant update this group");
    }
}
