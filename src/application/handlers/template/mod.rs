//! Review template command and query handlers.

mod assign_template;
mod delete_template;
mod list_templates;
mod save_template;

pub use assign_template::{AssignTemplateCommand, AssignTemplateHandler};
pub use delete_template::{DeleteTemplateCommand, DeleteTemplateHandler};
pub use list_templates::{ListAssignedTemplatesQuery, ListTemplatesHandler, ListTemplatesQuery};
pub use save_template::{SaveTemplateCommand, SaveTemplateHandler};
