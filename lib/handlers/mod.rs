//! Command handlers.

mod action;
mod event;
mod resource;
mod resource_type;
mod stack;
mod template;

//--------------------------------------------------------------------------------------------------
// Re-Exports
//--------------------------------------------------------------------------------------------------

pub use action::{action_resume, action_suspend};
pub use event::{event_list, event_show};
pub use resource::{resource_list, resource_metadata, resource_show, resource_template};
pub use resource_type::{resource_type_list, resource_type_show};
pub use stack::{stack_create, stack_delete, stack_list, stack_show, stack_update};
pub use template::{template_show, template_validate};
