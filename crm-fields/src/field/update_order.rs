//! UpdateFieldOrder command

use crate::context::FieldsContext;
use crate::error::{FieldsError, Result};
use crate::operation::{Execute, ExecutionResult, Operation};
use crate::types::{Field, FieldId};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One (id, order) assignment
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct OrderItem {
    pub id: FieldId,
    pub order: i64,
}

/// Reassign the order of several fields.
///
/// Each assignment is written independently and in sequence; the batch is not
/// checked for duplicate orders.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UpdateFieldOrder {
    pub orders: Vec<OrderItem>,
}

impl UpdateFieldOrder {
    pub fn new() -> Self {
        Self { orders: Vec::new() }
    }

    pub fn with(mut self, id: impl Into<FieldId>, order: i64) -> Self {
        self.orders.push(OrderItem {
            id: id.into(),
            order,
        });
        self
    }

    pub async fn apply(&self, ctx: &FieldsContext) -> Result<Vec<Field>> {
        let mut updated = Vec::with_capacity(self.orders.len());
        for item in &self.orders {
            let mut field = ctx.read_field(&item.id).await?;
            field.order = item.order;
            ctx.write_field(&field).await?;
            updated.push(field);
        }
        Ok(updated)
    }
}

impl Default for UpdateFieldOrder {
    fn default() -> Self {
        Self::new()
    }
}

impl Operation for UpdateFieldOrder {
    fn verb(&self) -> &'static str {
        "reorder"
    }

    fn noun(&self) -> &'static str {
        "field"
    }

    fn description(&self) -> &'static str {
        "Set the order of several fields"
    }
}

#[async_trait]
impl Execute<FieldsContext, FieldsError> for UpdateFieldOrder {
    async fn execute(&self, ctx: &FieldsContext) -> ExecutionResult<Value, FieldsError> {
        let start = std::time::Instant::now();
        let input = serde_json::to_value(self).unwrap_or_default();

        let result: Result<Value> =
            async { Ok(serde_json::to_value(self.apply(ctx).await?)?) }.await;

        ExecutionResult::logged(self.op_string(), input, None, start, result)
    }
}
