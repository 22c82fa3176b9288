//! Authentication configuration

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use super::error::ValidationError;
use super::server::Environment;
use crate::adapters::auth::JwtConfig;

/// Bearer token settings (HS256 JWT)
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// Shared signing secret
    pub jwt_secret: Option<SecretString>,

    /// Expected `iss` claim
    pub issuer: Option<String>,

    /// Expected `aud` claim
    pub audience: Option<String>,

    /// Accept fixed development tokens instead of JWTs (never in production)
    #[serde(default)]
    pub dev_tokens: bool,
}

impl AuthConfig {
    /// JWT settings, or `None` when no secret is configured.
    pub fn jwt_config(&self) -> Option<JwtConfig> {
        self.jwt_secret.as_ref().map(|secret| JwtConfig {
            secret: secret.clone(),
            issuer: self.issuer.clone(),
            audience: self.audience.clone(),
        })
    }

    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        match &self.jwt_secret {
            Some(secret) if secret.expose_secret().len() < 32 => {
                Err(ValidationError::WeakJwtSecret)
            }
            Some(_) => Ok(()),
            None if self.dev_tokens && *environment != Environment::Production => Ok(()),
            None => Err(ValidationError::MissingRequired("AUTH__JWT_SECRET")),
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: None,
            issuer: None,
            audience: None,
            dev_tokens: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_secret(secret: &str) -> AuthConfig {
        AuthConfig {
            jwt_secret: Some(SecretString::new(secret.to_string())),
            ..Default::default()
        }
    }

    #[test]
    fn test_missing_secret_is_rejected() {
        assert!(AuthConfig::default().validate(&Environment::Development).is_err());
    }

    #[test]
    fn test_short_secret_is_rejected() {
        assert!(matches!(
            with_secret("short").validate(&Environment::Development),
            Err(ValidationError::WeakJwtSecret)
        ));
    }

    #[test]
    fn test_dev_tokens_only_outside_production() {
        let config = AuthConfig {
            dev_tokens: true,
            ..Default::default()
        };
        assert!(config.validate(&Environment::Development).is_ok());
        assert!(config.validate(&Environment::Production).is_err());
    }

    #[test]
    fn test_jwt_config_carries_issuer() {
        let config = AuthConfig {
            issuer: Some("humance-idp".to_string()),
            ..with_secret("0123456789abcdef0123456789abcdef")
        };
        assert!(config.validate(&Environment::Production).is_ok());
        let jwt = config.jwt_config().unwrap();
        assert_eq!(jwt.issuer.as_deref(), Some("humance-idp"));
        assert!(AuthConfig::default().jwt_config().is_none());
    }
}
