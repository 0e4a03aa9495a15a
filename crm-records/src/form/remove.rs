//! RemoveForm command

use crate::context::CrmContext;
use crate::error::{RecordsError, Result};
use crate::types::{Form, FormId};
use async_trait::async_trait;
use crm_fields::config::content_types;
use crm_fields::field::{purge, ListFields};
use crm_fields::{Execute, ExecutionResult, Operation};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

/// Delete a form and every field attached to it
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RemoveForm {
    pub id: FormId,
}

impl RemoveForm {
    pub fn new(id: impl Into<FormId>) -> Self {
        Self { id: id.into() }
    }

    pub async fn apply(&self, ctx: &CrmContext) -> Result<Form> {
        let form = ctx.records.read_form(&self.id).await?;

        let fields = ListFields::new(content_types::FORM)
            .for_instance(form.id.as_str())
            .apply(&ctx.fields)
            .await?;
        for field in &fields {
            purge(&ctx.fields, field).await?;
        }

        ctx.records.delete_form_file(&form.id).await?;
        info!(id = %form.id, fields = fields.len(), "removed form");
        Ok(form)
    }
}

impl Operation for RemoveForm {
    fn verb(&self) -> &'static str {
        "remove"
    }

    fn noun(&self) -> &'static str {
        "form"
    }

    fn description(&self) -> &'static str {
        "Remove a form and its fields"
    }
}

#[async_trait]
impl Execute<CrmContext, RecordsError> for RemoveForm {
    async fn execute(&self, ctx: &CrmContext) -> ExecutionResult<Value, RecordsError> {
        let start = std::time::Instant::now();
        let input = serde_json::to_value(self).unwrap_or_default();

        let result: Result<Value> =
            async { Ok(serde_json::to_value(self.apply(ctx).await?)?) }.await;

        ExecutionResult::logged(self.op_string(), input, None, start, result)
    }
}
