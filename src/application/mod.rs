//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Command handlers receive a `CommandMetadata` carrying the caller; query
//! handlers receive the caller inside the query.

pub mod handlers;
