//! Audited execution of record operations

use async_trait::async_trait;
use crm_fields::{Execute, OperationProcessor};
use serde_json::Value;
use tracing::warn;

use crate::context::CrmContext;
use crate::error::{RecordsError, Result};

/// Executes record operations, appending their log entries to the field
/// registry's activity log.
#[derive(Debug, Clone, Default)]
pub struct RecordsOperationProcessor {
    actor: Option<String>,
}

impl RecordsOperationProcessor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_actor(actor: impl Into<String>) -> Self {
        Self {
            actor: Some(actor.into()),
        }
    }
}

#[async_trait]
impl OperationProcessor<CrmContext, RecordsError> for RecordsOperationProcessor {
    async fn process<T>(&self, operation: &T, ctx: &CrmContext) -> Result<Value>
    where
        T: Execute<CrmContext, RecordsError> + Send + Sync,
    {
        let (result, log_entry) = operation.execute(ctx).await.split();

        if let Some(mut entry) = log_entry {
            if let Some(actor) = &self.actor {
                entry = entry.with_actor(actor.clone());
            }
            if let Err(e) = ctx.fields.append_activity(&entry).await {
                warn!(op = %entry.op, %e, "failed to append activity log");
            }
        }

        result
    }
}
