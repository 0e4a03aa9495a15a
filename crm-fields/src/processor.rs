//! Audited execution of field and group operations

use async_trait::async_trait;
use serde_json::Value;
use tracing::warn;

use crate::context::FieldsContext;
use crate::error::{FieldsError, Result};
use crate::operation::{Execute, OperationProcessor};

/// Executes operations and appends their log entries to the activity log.
#[derive(Debug, Clone, Default)]
pub struct FieldsOperationProcessor {
    actor: Option<String>,
}

impl FieldsOperationProcessor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `actor` on every entry that does not name its own.
    pub fn with_actor(actor: impl Into<String>) -> Self {
        Self {
            actor: Some(actor.into()),
        }
    }

    pub fn actor(&self) -> Option<&str> {
        self.actor.as_deref()
    }
}

#[async_trait]
impl OperationProcessor<FieldsContext, FieldsError> for FieldsOperationProcessor {
    async fn process<T>(&self, operation: &T, ctx: &FieldsContext) -> Result<Value>
    where
        T: Execute<FieldsContext, FieldsError> + Send + Sync,
    {
        let (result, log_entry) = operation.execute(ctx).await.split();

        if let Some(mut entry) = log_entry {
            if let Some(actor) = &self.actor {
                entry = entry.with_actor(actor.clone());
            }
            // The operation has already committed at this point.
            if let Err(e) = ctx.append_activity(&entry).await {
                warn!(op = %entry.op, %e, "failed to append activity log");
            }
        }

        result
    }
}
