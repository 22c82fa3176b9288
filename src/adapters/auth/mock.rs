//! Mock session validator for tests and local development.
//!
//! # Example
//!
//! ```ignore
//! use humance::adapters::auth::MockSessionValidator;
//! use humance::domain::foundation::Role;
//!
//! let validator = MockSessionValidator::new()
//!     .with_test_user("admin-token", "admin-1", Role::Administrator);
//! let user = validator.validate("admin-token").await?;
//! ```

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, AuthenticatedUser, Role, UserId};
use crate::ports::SessionValidator;

/// Maps fixed tokens to users. Unknown tokens return `InvalidToken`.
#[derive(Debug, Default)]
pub struct MockSessionValidator {
    tokens: RwLock<HashMap<String, AuthenticatedUser>>,
    force_error: RwLock<Option<AuthError>>,
}

impl MockSessionValidator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_user(self, token: impl Into<String>, user: AuthenticatedUser) -> Self {
        self.add_token(token, user);
        self
    }

    /// Registers `token` for a user with a generated email.
    pub fn with_test_user(self, token: impl Into<String>, user_id: &str, role: Role) -> Self {
        let user = AuthenticatedUser::new(
            UserId::new(user_id).expect("test user id must not be empty"),
            format!("{}@humance.test", user_id),
            None,
            role,
        );
        self.with_user(token, user)
    }

    /// Makes every validation fail with `error`.
    pub fn with_error(self, error: AuthError) -> Self {
        *self.force_error.write().expect("mock lock poisoned") = Some(error);
        self
    }

    pub fn add_token(&self, token: impl Into<String>, user: AuthenticatedUser) {
        self.tokens
            .write()
            .expect("mock lock poisoned")
            .insert(token.into(), user);
    }

    pub fn token_count(&self) -> usize {
        self.tokens.read().expect("mock lock poisoned").len()
    }
}

#[async_trait]
impl SessionValidator for MockSessionValidator {
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        if let Some(error) = self.force_error.read().expect("mock lock poisoned").clone() {
            return Err(error);
        }
        self.tokens
            .read()
            .expect("mock lock poisoned")
            .get(token)
            .cloned()
            .ok_or(AuthError::InvalidToken)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn known_token_returns_user() {
        let validator = MockSessionValidator::new().with_test_user("t-1", "mgr-1", Role::Manager);
        let user = validator.validate("t-1").await.unwrap();
        assert_eq!(user.role, Role::Manager);
        assert_eq!(user.email, "mgr-1@humance.test");
        assert_eq!(validator.token_count(), 1);
    }

    #[tokio::test]
    async fn unknown_token_is_invalid() {
        let validator = MockSessionValidator::new();
        assert_eq!(validator.validate("nope").await.unwrap_err(), AuthError::InvalidToken);
    }

    #[tokio::test]
    async fn forced_error_wins() {
        let validator = MockSessionValidator::new()
            .with_test_user("t-1", "mgr-1", Role::Manager)
            .with_error(AuthError::service_unavailable("down"));
        assert!(matches!(
            validator.validate("t-1").await,
            Err(AuthError::ServiceUnavailable(_))
        ));
    }
}
