//! HTTP adapter for review templates and their manager assignments.

mod dto;
mod handlers;
mod routes;

pub use dto::TemplateResponse;
pub use handlers::TemplateHandlers;
pub use routes::template_routes;
