//! CleanValues command

use crate::context::FieldsContext;
use crate::error::{FieldsError, Result};
use crate::field::clean::clean_with;
use crate::operation::{Execute, ExecutionResult, Operation};
use crate::types::{FieldId, FieldValue};
use async_trait::async_trait;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Validate a whole custom-data map, in submission order.
///
/// The first rejected entry fails the call; no partial map is returned.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CleanValues {
    pub values: IndexMap<FieldId, FieldValue>,
}

impl CleanValues {
    pub fn new(values: IndexMap<FieldId, FieldValue>) -> Self {
        Self { values }
    }

    pub async fn apply(&self, ctx: &FieldsContext) -> Result<IndexMap<FieldId, FieldValue>> {
        let mut cleaned = IndexMap::with_capacity(self.values.len());
        for (field_id, value) in &self.values {
            let field = ctx.find_field(field_id).await?.ok_or_else(|| {
                FieldsError::SubmissionFieldNotFound {
                    id: field_id.to_string(),
                }
            })?;
            cleaned.insert(field_id.clone(), clean_with(&field, value)?);
        }
        Ok(cleaned)
    }
}

impl Operation for CleanValues {
    fn verb(&self) -> &'static str {
        "clean"
    }

    fn noun(&self) -> &'static str {
        "values"
    }

    fn description(&self) -> &'static str {
        "Validate a map of submitted field values"
    }
}

#[async_trait]
impl Execute<FieldsContext, FieldsError> for CleanValues {
    async fn execute(&self, ctx: &FieldsContext) -> ExecutionResult<Value, FieldsError> {
        let result: Result<Value> =
            async { Ok(serde_json::to_value(self.apply(ctx).await?)?) }.await;
        ExecutionResult::unlogged(result)
    }
}
