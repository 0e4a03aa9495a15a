//! AddForm command

use crate::context::CrmContext;
use crate::error::{RecordsError, Result};
use crate::form::generate_code;
use crate::types::{Form, FormDoc, FormId};
use async_trait::async_trait;
use chrono::Utc;
use crm_fields::{Execute, ExecutionResult, Operation};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

/// Create a form owned by a user
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddForm {
    #[serde(flatten)]
    pub doc: FormDoc,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_user_id: Option<String>,
}

impl AddForm {
    pub fn new(doc: FormDoc) -> Self {
        Self {
            doc,
            created_user_id: None,
        }
    }

    pub fn by(mut self, user_id: impl Into<String>) -> Self {
        self.created_user_id = Some(user_id.into());
        self
    }

    pub async fn apply(&self, ctx: &CrmContext) -> Result<Form> {
        let created_user_id = match self.created_user_id.as_deref() {
            Some(id) if !id.is_empty() => id.to_string(),
            _ => return Err(RecordsError::CreatedUserRequired),
        };

        let form = Form {
            id: FormId::new(),
            title: self.doc.title.clone(),
            description: self.doc.description.clone(),
            code: generate_code(),
            created_user_id,
            created_date: Utc::now(),
        };
        ctx.records.write_form(&form).await?;
        debug!(id = %form.id, code = %form.code, "created form");
        Ok(form)
    }
}

impl Operation for AddForm {
    fn verb(&self) -> &'static str {
        "add"
    }

    fn noun(&self) -> &'static str {
        "form"
    }

    fn description(&self) -> &'static str {
        "Create a form"
    }
}

#[async_trait]
impl Execute<CrmContext, RecordsError> for AddForm {
    async fn execute(&self, ctx: &CrmContext) -> ExecutionResult<Value, RecordsError> {
        let start = std::time::Instant::now();
        let input = serde_json::to_value(self).unwrap_or_default();

        let result: Result<Value> =
            async { Ok(serde_json::to_value(self.apply(ctx).await?)?) }.await;

        ExecutionResult::logged(
            self.op_string(),
            input,
            self.created_user_id.clone(),
            start,
            result,
        )
    }
}
