//! Authentication adapters implementing the `SessionValidator` port.
//!
//! - `jwt` - HS256 bearer tokens signed by the identity provider
//! - `mock` - fixed tokens for tests and local development

mod jwt;
mod mock;

pub use jwt::{HumanceClaims, JwtConfig, JwtSessionValidator};
pub use mock::MockSessionValidator;
