//! UpdateCustomer command

use crate::context::CrmContext;
use crate::customer::check_duplication;
use crate::error::{RecordsError, Result};
use crate::types::{Customer, CustomerId, CustomerPatch};
use async_trait::async_trait;
use crm_fields::field::CleanValues;
use crm_fields::{Execute, ExecutionResult, Operation};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Update a customer, validating any replacement custom values
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UpdateCustomer {
    pub id: CustomerId,
    #[serde(flatten)]
    pub changes: CustomerPatch,
}

impl UpdateCustomer {
    pub fn new(id: impl Into<CustomerId>, changes: CustomerPatch) -> Self {
        Self {
            id: id.into(),
            changes,
        }
    }

    pub async fn apply(&self, ctx: &CrmContext) -> Result<Customer> {
        let _guard = ctx.records.lock_customers().await;
        let mut customer = ctx.records.read_customer(&self.id).await?;
        check_duplication(&ctx.records, self.changes.email.as_deref(), Some(&self.id)).await?;

        let mut changes = self.changes.clone();
        if let Some(values) = changes.custom_fields_data.take() {
            changes.custom_fields_data = Some(CleanValues::new(values).apply(&ctx.fields).await?);
        }

        changes.apply(&mut customer);
        ctx.records.write_customer(&customer).await?;
        Ok(customer)
    }
}

impl Operation for UpdateCustomer {
    fn verb(&self) -> &'static str {
        "update"
    }

    fn noun(&self) -> &'static str {
        "customer"
    }

    fn description(&self) -> &'static str {
        "Update a customer"
    }
}

#[async_trait]
impl Execute<CrmContext, RecordsError> for UpdateCustomer {
    async fn execute(&self, ctx: &CrmContext) -> ExecutionResult<Value, RecordsError> {
        let start = std::time::Instant::now();
        let input = serde_json::to_value(self).unwrap_or_default();

        let result: Result<Value> =
            async { Ok(serde_json::to_value(self.apply(ctx).await?)?) }.await;

        ExecutionResult::logged(self.op_string(), input, None, start, result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::customer::AddCustomer;
    use crate::test_support::setup;
    use crate::types::{CustomValues, CustomerDoc};
    use crm_fields::field::CreateField;
    use crm_fields::{ErrorKind, FieldDoc, FieldValue, ValidationKind};

    #[tokio::test]
    async fn test_update_customer() {
        let (ctx, _tmp) = setup().await;
        let age = CreateField::new(
            FieldDoc::new("customer")
                .with_text("Age")
                .with_validation(ValidationKind::Number),
        )
        .apply(&ctx.fields)
        .await
        .unwrap();
        let customer = AddCustomer::new(CustomerDoc::new().with_email("a@b.com"))
            .apply(&ctx)
            .await
            .unwrap();

        let updated = UpdateCustomer::new(
            customer.id.clone(),
            CustomerPatch::new()
                .with_first_name("Ada")
                .with_email("a@b.com")
                .with_values(CustomValues::from([(age.id.clone(), FieldValue::from("36"))])),
        )
        .apply(&ctx)
        .await
        .unwrap();

        assert_eq!(updated.first_name.as_deref(), Some("Ada"));
        assert_eq!(updated.custom_fields_data[&age.id], FieldValue::from("36"));
        assert_eq!(updated.created_at, customer.created_at);
    }

    #[tokio::test]
    async fn test_email_taken_by_other_customer() {
        let (ctx, _tmp) = setup().await;
        AddCustomer::new(CustomerDoc::new().with_email("a@b.com"))
            .apply(&ctx)
            .await
            .unwrap();
        let other = AddCustomer::new(CustomerDoc::new().with_email("c@d.com"))
            .apply(&ctx)
            .await
            .unwrap();

        let err = UpdateCustomer::new(other.id.clone(), CustomerPatch::new().with_email("a@b.com"))
            .apply(&ctx)
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Duplicated email");
    }

    #[tokio::test]
    async fn test_unknown_customer() {
        let (ctx, _tmp) = setup().await;
        let err = UpdateCustomer::new("missing", CustomerPatch::new())
            .apply(&ctx)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }
}
