//! UpdateGroup command

use crate::context::FieldsContext;
use crate::error::{FieldsError, Result};
use crate::guard::ensure_mutable;
use crate::operation::{Execute, ExecutionResult, Operation};
use crate::types::{FieldGroup, GroupId, GroupPatch};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Update a user-defined group
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UpdateGroup {
    pub id: GroupId,
    #[serde(flatten)]
    pub changes: GroupPatch,
}

impl UpdateGroup {
    pub fn new(id: impl Into<GroupId>, changes: GroupPatch) -> Self {
        Self {
            id: id.into(),
            changes,
        }
    }

    pub async fn apply(&self, ctx: &FieldsContext) -> Result<FieldGroup> {
        let mut group = ctx.read_group(&self.id).await?;
        ensure_mutable(&group)?;
        self.changes.apply(&mut group);
        ctx.write_group(&group).await?;
        Ok(group)
    }
}

impl Operation for UpdateGroup {
    fn verb(&self) -> &'static str {
        "update"
    }

    fn noun(&self) -> &'static str {
        "group"
    }

    fn description(&self) -> &'static str {
        "Update a field group"
    }
}

#[async_trait]
impl Execute<FieldsContext, FieldsError> for UpdateGroup {
    async fn execute(&self, ctx: &FieldsContext) -> ExecutionResult<Value, FieldsError> {
        let start = std::time::Instant::now();
        let input = serde_json::to_value(self).unwrap_or_default();

        let result: Result<Value> =
            async { Ok(serde_json::to_value(self.apply(ctx).await?)?) }.await;

        ExecutionResult::logged(self.op_string(), input, None, start, result)
    }
}
