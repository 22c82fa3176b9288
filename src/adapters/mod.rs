//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `memory` / `postgres` - Persistence backends
//! - `auth` - Bearer token validation
//! - `ai` - Review feedback generation
//! - `events` - Event publishing (log sink, in-memory capture)
//! - `http` - The REST surface

pub mod ai;
pub mod auth;
pub mod events;
pub mod http;
pub mod memory;
pub mod postgres;

pub use events::{InMemoryEventBus, LoggingEventPublisher};
pub use memory::{DirectorySeed, InMemoryStore};
