//! UpdateField command

use crate::context::FieldsContext;
use crate::error::{FieldsError, Result};
use crate::field::check_placement;
use crate::guard::ensure_mutable;
use crate::operation::{Execute, ExecutionResult, Operation};
use crate::types::{Field, FieldId, FieldPatch};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Update a user-defined field's attributes
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UpdateField {
    pub id: FieldId,
    #[serde(flatten)]
    pub changes: FieldPatch,
}

impl UpdateField {
    pub fn new(id: impl Into<FieldId>, changes: FieldPatch) -> Self {
        Self {
            id: id.into(),
            changes,
        }
    }

    pub async fn apply(&self, ctx: &FieldsContext) -> Result<Field> {
        let mut field = ctx.read_field(&self.id).await?;
        ensure_mutable(&field)?;

        self.changes.apply(&mut field);
        if self.changes.moves_field() {
            check_placement(
                ctx,
                &field.content_type,
                &mut field.content_type_id,
                &mut field.group_id,
            )
            .await?;
        }

        ctx.write_field(&field).await?;
        Ok(field)
    }
}

impl Operation for UpdateField {
    fn verb(&self) -> &'static str {
        "update"
    }

    fn noun(&self) -> &'static str {
        "field"
    }

    fn description(&self) -> &'static str {
        "Update a custom field"
    }
}

#[async_trait]
impl Execute<FieldsContext, FieldsError> for UpdateField {
    async fn execute(&self, ctx: &FieldsContext) -> ExecutionResult<Value, FieldsError> {
        let start = std::time::Instant::now();
        let input = serde_json::to_value(self).unwrap_or_default();

        let result: Result<Value> =
            async { Ok(serde_json::to_value(self.apply(ctx).await?)?) }.await;

        ExecutionResult::logged(self.op_string(), input, None, start, result)
    }
}
