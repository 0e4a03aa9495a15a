//! Field operations

mod clean;
mod clean_multi;
mod create;
mod list;
mod remove;
mod update;
mod update_order;
mod update_visible;

pub use clean::{clean_with, CleanValue};
pub use clean_multi::CleanValues;
pub use create::CreateField;
pub(crate) use create::check_placement;
pub use list::ListFields;
pub use remove::{purge, RemoveField};
pub use update::UpdateField;
pub use update_order::{OrderItem, UpdateFieldOrder};
pub use update_visible::UpdateFieldVisible;
