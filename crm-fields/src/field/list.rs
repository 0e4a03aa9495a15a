//! ListFields command

use crate::context::FieldsContext;
use crate::error::{FieldsError, Result};
use crate::operation::{Execute, ExecutionResult, Operation};
use crate::types::Field;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// List the fields of a content type, optionally narrowed to one instance
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListFields {
    pub content_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type_id: Option<String>,
}

impl ListFields {
    pub fn new(content_type: impl Into<String>) -> Self {
        Self {
            content_type: content_type.into(),
            content_type_id: None,
        }
    }

    pub fn for_instance(mut self, content_type_id: impl Into<String>) -> Self {
        self.content_type_id = Some(content_type_id.into());
        self
    }

    pub async fn apply(&self, ctx: &FieldsContext) -> Result<Vec<Field>> {
        ctx.policy(&self.content_type)?;
        let mut fields: Vec<Field> = ctx
            .read_all_fields()
            .await?
            .into_iter()
            .filter(|f| f.content_type == self.content_type)
            .filter(|f| match &self.content_type_id {
                Some(id) => f.content_type_id.as_ref() == Some(id),
                None => true,
            })
            .collect();
        fields.sort_by(|a, b| a.order.cmp(&b.order).then_with(|| a.id.cmp(&b.id)));
        Ok(fields)
    }
}

impl Operation for ListFields {
    fn verb(&self) -> &'static str {
        "list"
    }

    fn noun(&self) -> &'static str {
        "fields"
    }

    fn description(&self) -> &'static str {
        "List custom fields in display order"
    }
}

#[async_trait]
impl Execute<FieldsContext, FieldsError> for ListFields {
    async fn execute(&self, ctx: &FieldsContext) -> ExecutionResult<Value, FieldsError> {
        let result: Result<Value> =
            async { Ok(serde_json::to_value(self.apply(ctx).await?)?) }.await;
        ExecutionResult::unlogged(result)
    }
}
