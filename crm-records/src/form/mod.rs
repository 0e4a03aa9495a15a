//! Form operations

mod add;
mod duplicate;
mod remove;
mod update;

pub use add::AddForm;
pub use duplicate::DuplicateForm;
pub use remove::RemoveForm;
pub use update::UpdateForm;

use rand::distr::Alphanumeric;
use rand::Rng;

/// Length of a form's embed code
pub const CODE_LENGTH: usize = 6;

/// Generate a fresh random embed code
pub(crate) fn generate_code() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(CODE_LENGTH)
        .map(char::from)
        .collect()
}
