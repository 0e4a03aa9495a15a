//! Field group operations

mod create;
mod list;
mod remove;
mod update;
mod update_visible;

pub use create::CreateGroup;
pub use list::{GroupWithFields, ListGroups};
pub use remove::RemoveGroup;
pub use update::UpdateGroup;
pub use update_visible::UpdateGroupVisible;
