//! DuplicateForm command

use crate::context::CrmContext;
use crate::error::{RecordsError, Result};
use crate::form::generate_code;
use crate::types::{Form, FormId};
use async_trait::async_trait;
use chrono::Utc;
use crm_fields::config::content_types;
use crm_fields::field::{CreateField, ListFields};
use crm_fields::{Execute, ExecutionResult, FieldDoc, Operation};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

/// Copy a form and its fields under a fresh id and code
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DuplicateForm {
    pub id: FormId,
}

impl DuplicateForm {
    pub fn new(id: impl Into<FormId>) -> Self {
        Self { id: id.into() }
    }

    pub async fn apply(&self, ctx: &CrmContext) -> Result<Form> {
        let source = ctx.records.read_form(&self.id).await?;
        let copy = Form {
            id: FormId::new(),
            title: format!("{} duplicated", source.title),
            description: source.description.clone(),
            code: generate_code(),
            created_user_id: source.created_user_id.clone(),
            created_date: Utc::now(),
        };
        ctx.records.write_form(&copy).await?;

        // Listed in display order, so appending keeps the same sequence.
        let fields = ListFields::new(content_types::FORM)
            .for_instance(source.id.as_str())
            .apply(&ctx.fields)
            .await?;
        for field in &fields {
            let mut doc = FieldDoc::from(field);
            doc.content_type_id = Some(copy.id.to_string());
            CreateField::new(doc).apply(&ctx.fields).await?;
        }

        debug!(source = %source.id, id = %copy.id, fields = fields.len(), "duplicated form");
        Ok(copy)
    }
}

impl Operation for DuplicateForm {
    fn verb(&self) -> &'static str {
        "duplicate"
    }

    fn noun(&self) -> &'static str {
        "form"
    }

    fn description(&self) -> &'static str {
        "Copy a form together with its fields"
    }
}

#[async_trait]
impl Execute<CrmContext, RecordsError> for DuplicateForm {
    async fn execute(&self, ctx: &CrmContext) -> ExecutionResult<Value, RecordsError> {
        let start = std::time::Instant::now();
        let input = serde_json::to_value(self).unwrap_or_default();

        let result: Result<Value> =
            async { Ok(serde_json::to_value(self.apply(ctx).await?)?) }.await;

        ExecutionResult::logged(self.op_string(), input, None, start, result)
    }
}
