//! Authentication types shared by the auth port and the HTTP layer.

use super::{Actor, Role, UserId};
use thiserror::Error;

/// A user whose bearer token has been validated.
///
/// Injected into each request by the auth middleware and converted into an
/// [`Actor`] before reaching any handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub id: UserId,
    pub email: String,
    pub display_name: Option<String>,
    pub role: Role,
}

impl AuthenticatedUser {
    pub fn new(
        id: UserId,
        email: impl Into<String>,
        display_name: Option<String>,
        role: Role,
    ) -> Self {
        Self {
            id,
            email: email.into(),
            display_name,
            role,
        }
    }

    pub fn display_name_or_email(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.email)
    }

    pub fn actor(&self) -> Actor {
        Actor::new(self.id.clone(), self.role)
    }
}

/// Failures while validating a bearer token.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("Invalid or expired token")]
    InvalidToken,

    #[error("Token expired")]
    TokenExpired,

    #[error("Token carries an unknown role: {0}")]
    UnknownRole(String),

    #[error("Auth service unavailable: {0}")]
    ServiceUnavailable(String),
}

impl AuthError {
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::ServiceUnavailable(message.into())
    }

    pub fn requires_reauthentication(&self) -> bool {
        matches!(
            self,
            AuthError::InvalidToken | AuthError::TokenExpired | AuthError::UnknownRole(_)
        )
    }
}
