//! HTTP adapter for reviews and their weekly observations.

mod dto;
mod handlers;
mod routes;

pub use dto::{ReviewDetailsResponse, ReviewResponse};
pub use handlers::ReviewHandlers;
pub(crate) use handlers::metadata_for;
pub use routes::review_routes;
