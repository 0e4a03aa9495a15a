//! Customer and form records for the custom field registry
//!
//! Customers carry a `customFieldsData` map validated through
//! [`crm_fields::field::CleanValues`]. Forms own the fields of the `form`
//! content type. [`RecordsContext`] plugs into the registry as both its
//! [`crm_fields::RecordValueStore`] and its [`crm_fields::ParentLookup`], so
//! removing a field scrubs customer values and form fields resolve their
//! parent.

pub mod context;
pub mod customer;
pub mod error;
pub mod form;
pub mod processor;
pub mod types;

#[cfg(test)]
mod test_support;

pub use context::{CrmContext, RecordsContext};
pub use error::{RecordsError, Result};
pub use processor::RecordsOperationProcessor;
pub use types::{Customer, CustomerDoc, CustomerId, CustomerPatch, CustomValues, Form, FormDoc, FormId};
