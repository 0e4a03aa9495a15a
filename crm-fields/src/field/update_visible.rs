//! UpdateFieldVisible command

use crate::context::FieldsContext;
use crate::error::{FieldsError, Result};
use crate::guard::ensure_mutable;
use crate::operation::{Execute, ExecutionResult, Operation};
use crate::types::{Field, FieldId};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Show or hide a user-defined field, recording who did it
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateFieldVisible {
    pub id: FieldId,
    pub is_visible: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

impl UpdateFieldVisible {
    pub fn new(id: impl Into<FieldId>, is_visible: bool) -> Self {
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

    pub async fn apply(&self, ctx: &FieldsContext) -> Result<Field> {
        let mut field = ctx.read_field(&self.id).await?;
        ensure_mutable(&field)?;

        field.is_visible = self.is_visible;
        if self.user_id.is_some() {
            field.last_updated_user_id = self.user_id.clone();
        }
        ctx.write_field(&field).await?;
        Ok(field)
    }
}

impl Operation for UpdateFieldVisible {
    fn verb(&self) -> &'static str {
        "toggle"
    }

    fn noun(&self) -> &'static str {
        "field"
    }

    fn description(&self) -> &'static str {
        "Show or hide a custom field"
    }
}

#[async_trait]
impl Execute<FieldsContext, FieldsError> for UpdateFieldVisible {
    async fn execute(&self, ctx: &FieldsContext) -> ExecutionResult<Value, FieldsError> {
        let start = std::time::Instant::now();
        let input = serde_json::to_value(self).unwrap_or_default();

        let result: Result<Value> =
            async { Ok(serde_json::to_value(self.apply(ctx).await?)?) }.await;

        ExecutionResult::logged(self.op_string(), input, self.user_id.clone(), start, result)
    }
}
