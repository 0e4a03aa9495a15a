//! Customers and their custom field values.

use super::ids::CustomerId;
use chrono::{DateTime, Utc};
use crm_fields::{FieldId, FieldValue};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Custom values keyed by field id, in submission order
pub type CustomValues = IndexMap<FieldId, FieldValue>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: CustomerId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default)]
    pub custom_fields_data: CustomValues,
    pub created_at: DateTime<Utc>,
}

/// Input for creating a customer
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerDoc {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default)]
    pub custom_fields_data: CustomValues,
}

impl CustomerDoc {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name(mut self, first: impl Into<String>, last: impl Into<String>) -> Self {
        self.first_name = Some(first.into());
        self.last_name = Some(last.into());
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    pub fn with_value(mut self, field_id: impl Into<FieldId>, value: impl Into<FieldValue>) -> Self {
        self.custom_fields_data.insert(field_id.into(), value.into());
        self
    }
}

/// Partial update of a customer. Absent keys are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Replaces the whole value map when present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_fields_data: Option<CustomValues>,
}

impl CustomerPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_first_name(mut self, name: impl Into<String>) -> Self {
        self.first_name = Some(name.into());
        self
    }

    pub fn with_values(mut self, values: CustomValues) -> Self {
        self.custom_fields_data = Some(values);
        self
    }

    pub fn apply(&self, customer: &mut Customer) {
        if let Some(v) = &self.first_name {
            customer.first_name = Some(v.clone());
        }
        if let Some(v) = &self.last_name {
            customer.last_name = Some(v.clone());
        }
        if let Some(v) = &self.email {
            customer.email = Some(v.clone());
        }
        if let Some(v) = &self.phone {
            customer.phone = Some(v.clone());
        }
        if let Some(v) = &self.custom_fields_data {
            customer.custom_fields_data = v.clone();
        }
    }
}
