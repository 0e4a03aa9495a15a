//! UpdateForm command

use crate::context::CrmContext;
use crate::error::{RecordsError, Result};
use crate::types::{Form, FormId};
use async_trait::async_trait;
use crm_fields::{Execute, ExecutionResult, Operation};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Change a form's title or description. Code and owner never change.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UpdateForm {
    pub id: FormId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl UpdateForm {
    pub fn new(id: impl Into<FormId>) -> Self {
        Self {
            id: id.into(),
            title: None,
            description: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub async fn apply(&self, ctx: &CrmContext) -> Result<Form> {
        let mut form = ctx.records.read_form(&self.id).await?;
        if let Some(title) = &self.title {
            form.title = title.clone();
        }
        if let Some(description) = &self.description {
            form.description = Some(description.clone());
        }
        ctx.records.write_form(&form).await?;
        Ok(form)
    }
}

impl Operation for UpdateForm {
    fn verb(&self) -> &'static str {
        "update"
    }

    fn noun(&self) -> &'static str {
        "form"
    }

    fn description(&self) -> &'static str {
        "Update a form's title or description"
    }
}

#[async_trait]
impl Execute<CrmContext, RecordsError> for UpdateForm {
    async fn execute(&self, ctx: &CrmContext) -> ExecutionResult<Value, RecordsError> {
        let start = std::time::Instant::now();
        let input = serde_json::to_value(self).unwrap_or_default();

        let result: Result<Value> =
            async { Ok(serde_json::to_value(self.apply(ctx).await?)?) }.await;

        ExecutionResult::logged(self.op_string(), input, None, start, result)
    }
}
