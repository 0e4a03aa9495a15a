//! Customer operations

mod add;
mod update;

pub use add::AddCustomer;
pub use update::UpdateCustomer;

use crate::context::RecordsContext;
use crate::error::{RecordsError, Result};
use crate::types::CustomerId;

/// Reject `email` if a customer other than `exclude` already uses it.
pub(crate) async fn check_duplication(
    records: &RecordsContext,
    email: Option<&str>,
    exclude: Option<&CustomerId>,
) -> Result<()> {
    let Some(email) = email else {
        return Ok(());
    };
    let taken = records
        .read_all_customers()
        .await?
        .iter()
        .any(|c| Some(&c.id) != exclude && c.email.as_deref() == Some(email));
    if taken {
        return Err(RecordsError::DuplicatedEmail {
            email: email.to_string(),
        });
    }
    Ok(())
}
