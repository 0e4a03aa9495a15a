//! AddCustomer command

use crate::context::CrmContext;
use crate::customer::check_duplication;
use crate::error::{RecordsError, Result};
use crate::types::{Customer, CustomerDoc, CustomerId};
use async_trait::async_trait;
use chrono::Utc;
use crm_fields::field::CleanValues;
use crm_fields::{Execute, ExecutionResult, Operation};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

/// Create a customer with validated custom field values
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AddCustomer {
    #[serde(flatten)]
    pub doc: CustomerDoc,
}

impl AddCustomer {
    pub fn new(doc: CustomerDoc) -> Self {
        Self { doc }
    }

    pub async fn apply(&self, ctx: &CrmContext) -> Result<Customer> {
        let _guard = ctx.records.lock_customers().await;
        check_duplication(&ctx.records, self.doc.email.as_deref(), None).await?;

        let custom_fields_data = CleanValues::new(self.doc.custom_fields_data.clone())
            .apply(&ctx.fields)
            .await?;

        let customer = Customer {
            id: CustomerId::new(),
            first_name: self.doc.first_name.clone(),
            last_name: self.doc.last_name.clone(),
            email: self.doc.email.clone(),
            phone: self.doc.phone.clone(),
            custom_fields_data,
            created_at: Utc::now(),
        };
        ctx.records.write_customer(&customer).await?;
        debug!(id = %customer.id, "created customer");
        Ok(customer)
    }
}

impl Operation for AddCustomer {
    fn verb(&self) -> &'static str {
        "add"
    }

    fn noun(&self) -> &'static str {
        "customer"
    }

    fn description(&self) -> &'static str {
        "Create a customer"
    }
}

#[async_trait]
impl Execute<CrmContext, RecordsError> for AddCustomer {
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
    use crate::test_support::setup;
    use crm_fields::field::CreateField;
    use crm_fields::{FieldDoc, FieldValue, ValidationKind};

    #[tokio::test]
    async fn test_add_customer_cleans_values() {
        let (ctx, _tmp) = setup().await;
        let birthday = CreateField::new(
            FieldDoc::new("customer")
                .with_text("Birthday")
                .with_validation(ValidationKind::Date),
        )
        .apply(&ctx.fields)
        .await
        .unwrap();

        let customer = AddCustomer::new(
            CustomerDoc::new()
                .with_name("Ada", "Lovelace")
                .with_email("ada@example.com")
                .with_value(birthday.id.clone(), "1815-12-10"),
        )
        .apply(&ctx)
        .await
        .unwrap();

        assert!(matches!(
            customer.custom_fields_data[&birthday.id],
            FieldValue::Date(_)
        ));
        assert_eq!(ctx.records.read_customer(&customer.id).await.unwrap(), customer);
    }

    #[tokio::test]
    async fn test_invalid_value_rejected() {
        let (ctx, _tmp) = setup().await;
        let email = CreateField::new(
            FieldDoc::new("customer")
                .with_text("Work email")
                .with_validation(ValidationKind::Email),
        )
        .apply(&ctx.fields)
        .await
        .unwrap();

        let err = AddCustomer::new(CustomerDoc::new().with_value(email.id.clone(), "nope"))
            .apply(&ctx)
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Work email: Invalid email");
        assert!(ctx.records.read_all_customers().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_duplicated_email() {
        let (ctx, _tmp) = setup().await;
        AddCustomer::new(CustomerDoc::new().with_email("a@b.com"))
            .apply(&ctx)
            .await
            .unwrap();
        let err = AddCustomer::new(CustomerDoc::new().with_email("a@b.com"))
            .apply(&ctx)
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Duplicated email");
    }
}
