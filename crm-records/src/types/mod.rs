//! Record types

mod customer;
mod form;
mod ids;

pub use customer::{Customer, CustomerDoc, CustomerPatch, CustomValues};
pub use form::{Form, FormDoc};
pub use ids::{CustomerId, FormId};
