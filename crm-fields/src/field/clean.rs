//! CleanValue command

use crate::context::FieldsContext;
use crate::error::{FieldsError, Result};
use crate::operation::{Execute, ExecutionResult, Operation};
use crate::types::{Field, FieldId, FieldValue};
use crate::validation::validate;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Validate a submitted value against its field's rules
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CleanValue {
    pub field_id: FieldId,
    #[serde(default)]
    pub value: FieldValue,
}

impl CleanValue {
    pub fn new(field_id: impl Into<FieldId>, value: impl Into<FieldValue>) -> Self {
        Self {
            field_id: field_id.into(),
            value: value.into(),
        }
    }

    pub async fn apply(&self, ctx: &FieldsContext) -> Result<FieldValue> {
        let field = ctx.find_field(&self.field_id).await?.ok_or_else(|| {
            FieldsError::SubmissionFieldNotFound {
                id: self.field_id.to_string(),
            }
        })?;
        clean_with(&field, &self.value)
    }
}

/// Run the validation engine for one field, prefixing failures with its label
pub fn clean_with(field: &Field, value: &FieldValue) -> Result<FieldValue> {
    validate(value, field.validation, field.is_required)
        .map_err(|reason| FieldsError::invalid_value(&field.text, reason))
}

impl Operation for CleanValue {
    fn verb(&self) -> &'static str {
        "clean"
    }

    fn noun(&self) -> &'static str {
        "value"
    }

    fn description(&self) -> &'static str {
        "Validate a submitted field value"
    }
}

#[async_trait]
impl Execute<FieldsContext, FieldsError> for CleanValue {
    async fn execute(&self, ctx: &FieldsContext) -> ExecutionResult<Value, FieldsError> {
        let result: Result<Value> =
            async { Ok(serde_json::to_value(self.apply(ctx).await?)?) }.await;
        ExecutionResult::unlogged(result)
    }
}
