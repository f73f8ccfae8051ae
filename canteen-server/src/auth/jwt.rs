//! JWT token service
//!
//! Issues and validates HS256 access tokens.

use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use ring::rand::{SecureRandom, SystemRandom};
use serde::{Deserialize, Serialize};
use shared::models::Role;
use thiserror::Error;

/// JWT configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtConfig {
    /// Signing secret (at least 32 bytes)
    pub secret: String,
    /// Token lifetime in minutes
    pub expiration_minutes: i64,
    pub issuer: String,
    pub audience: String,
}

impl JwtConfig {
    /// Load from `JWT_*` environment variables
    ///
    /// Debug builds generate a temporary secret when `JWT_SECRET` is unset;
    /// release builds refuse to start without one.
    pub fn from_env() -> Result<Self, JwtError> {
        Ok(Self {
            secret: load_jwt_secret()?,
            expiration_minutes: std::env::var("JWT_EXPIRATION_MINUTES")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(1440),
            issuer: std::env::var("JWT_ISSUER").unwrap_or_else(|_| "canteen-server".to_string()),
            audience: std::env::var("JWT_AUDIENCE")
                .unwrap_or_else(|_| "canteen-clients".to_string()),
        })
    }

    /// Fixed secret with default lifetime / issuer / audience
    pub fn with_secret(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            expiration_minutes: 1440,
            issuer: "canteen-server".to_string(),
            audience: "canteen-clients".to_string(),
        }
    }
}

/// JWT claims stored in the token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Account user_id (subject)
    pub sub: String,
    /// Display name
    pub name: String,
    /// Role name (student / attendant / manager)
    pub role: String,
    /// Comma separated permission list
    pub permissions: String,
    pub token_type: String,
    pub exp: i64,
    pub iat: i64,
    pub iss: String,
    pub aud: String,
}

#[derive(Error, Debug)]
pub enum JwtError {
    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Token expired")]
    ExpiredToken,

    #[error("Invalid signature")]
    InvalidSignature,

    #[error("Token generation failed: {0}")]
    GenerationFailed(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Generate a printable random secret (development only)
pub fn generate_secure_printable_jwt_secret() -> Result<String, JwtError> {
    const ALLOWED: &[u8] =
        b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789!@#$%^&*()-_=+";

    let rng = SystemRandom::new();
    let mut bytes = [0u8; 64];
    rng.fill(&mut bytes)
        .map_err(|_| JwtError::ConfigError("Failed to generate random key".to_string()))?;

    Ok(bytes
        .iter()
        .map(|b| ALLOWED[(*b as usize) % ALLOWED.len()] as char)
        .collect())
}

fn load_jwt_secret() -> Result<String, JwtError> {
    match std::env::var("JWT_SECRET") {
        Ok(secret) => {
            if secret.len() < 32 {
                return Err(JwtError::ConfigError(
                    "JWT_SECRET must be at least 32 characters long".to_string(),
                ));
            }
            Ok(secret)
        }
        Err(_) => {
            #[cfg(debug_assertions)]
            {
                tracing::warn!("JWT_SECRET not set, generating a temporary key for development");
                generate_secure_printable_jwt_secret()
            }
            #[cfg(not(debug_assertions))]
            {
                Err(JwtError::ConfigError(
                    "JWT_SECRET environment variable must be set in production".to_string(),
                ))
            }
        }
    }
}

/// JWT token service
#[derive(Clone)]
pub struct JwtService {
    pub config: JwtConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl std::fmt::Debug for JwtService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtService")
            .field("issuer", &self.config.issuer)
            .field("audience", &self.config.audience)
            .field("expiration_minutes", &self.config.expiration_minutes)
            .finish()
    }
}

impl JwtService {
    pub fn with_config(config: JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        Self {
            config,
            encoding_key,
            decoding_key,
        }
    }

    /// Issue a token for an account
    pub fn generate_token(
        &self,
        user_id: &str,
        name: &str,
        role: Role,
        permissions: &[String],
    ) -> Result<String, JwtError> {
        let now = Utc::now();
        let expiration = now + Duration::minutes(self.config.expiration_minutes);

        let claims = Claims {
            sub: user_id.to_string(),
            name: name.to_string(),
            role: role.as_str().to_string(),
            permissions: permissions.join(","),
            token_type: "access".to_string(),
            exp: expiration.timestamp(),
            iat: now.timestamp(),
            iss: self.config.issuer.clone(),
            aud: self.config.audience.clone(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| JwtError::GenerationFailed(e.to_string()))
    }

    /// Validate and decode a token
    pub fn validate_token(&self, token: &str) -> Result<Claims, JwtError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_audience(&[&self.config.audience]);
        validation.set_issuer(&[&self.config.issuer]);
        validation.set_required_spec_claims(&["sub", "exp", "iat", "iss", "aud"]);

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            match e.kind() {
                ErrorKind::ExpiredSignature => JwtError::ExpiredToken,
                ErrorKind::InvalidSignature => JwtError::InvalidSignature,
                _ => JwtError::InvalidToken(e.to_string()),
            }
        })?;

        Ok(token_data.claims)
    }

    /// Extract the token from an `Authorization` header value
    pub fn extract_from_header(header: &str) -> Option<&str> {
        header.strip_prefix("Bearer ")
    }
}

/// Current user context (parsed from JWT claims)
///
/// Inserted into request extensions by [`crate::auth::require_auth`].
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: String,
    pub name: String,
    pub role: Role,
    pub permissions: Vec<String>,
}

impl TryFrom<Claims> for CurrentUser {
    type Error = JwtError;

    fn try_from(claims: Claims) -> Result<Self, Self::Error> {
        let role = Role::parse(&claims.role)
            .ok_or_else(|| JwtError::InvalidToken(format!("unknown role '{}'", claims.role)))?;
        let permissions = claims
            .permissions
            .split(',')
            .filter(|s| !s.is_empty())
            .map(|s| s.to_string())
            .collect();

        Ok(Self {
            id: claims.sub,
            name: claims.name,
            role,
            permissions,
        })
    }
}

impl CurrentUser {
    /// Permission check
    ///
    /// - `"all"` grants everything
    /// - `"orders:*"` matches `"orders:place"`, `"orders:view_all"`, ...
    /// - otherwise exact match
    pub fn has_permission(&self, permission: &str) -> bool {
        self.permissions.iter().any(|p| {
            if p == "all" || p == permission {
                return true;
            }
            match p.strip_suffix(":*") {
                Some(prefix) => permission.starts_with(&format!("{}:", prefix)),
                None => false,
            }
        })
    }

    /// True when the user owns the resource or holds `permission`
    pub fn owns_or_has(&self, owner_id: &str, permission: &str) -> bool {
        self.id == owner_id || self.has_permission(permission)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> JwtService {
        JwtService::with_config(JwtConfig::with_secret(
            "unit-test-secret-that-is-long-enough-1234",
        ))
    }

    #[test]
    fn test_jwt_generation_and_validation() {
        let service = service();
        let permissions = vec!["menu:view".to_string(), "orders:place".to_string()];

        let token = service
            .generate_token("21CS042", "Asha", Role::Student, &permissions)
            .expect("Failed to generate test token");
        let claims = service
            .validate_token(&token)
            .expect("Failed to validate test token");

        assert_eq!(claims.sub, "21CS042");
        assert_eq!(claims.name, "Asha");
        assert_eq!(claims.role, "student");
        assert_eq!(claims.permissions, "menu:view,orders:place");

        let user = CurrentUser::try_from(claims).unwrap();
        assert_eq!(user.role, Role::Student);
        assert_eq!(user.permissions.len(), 2);
    }

    #[test]
    fn test_token_from_other_secret_rejected() {
        let other = JwtService::with_config(JwtConfig::with_secret(
            "a-completely-different-secret-0987654321",
        ));
        let token = other
            .generate_token("x", "X", Role::Manager, &["all".to_string()])
            .unwrap();
        assert!(matches!(
            service().validate_token(&token),
            Err(JwtError::InvalidSignature)
        ));
    }

    #[test]
    fn test_expired_token_rejected() {
        let mut config = JwtConfig::with_secret("unit-test-secret-that-is-long-enough-1234");
        config.expiration_minutes = -10;
        let service = JwtService::with_config(config);
        let token = service
            .generate_token("x", "X", Role::Student, &[])
            .unwrap();
        assert!(matches!(
            service.validate_token(&token),
            Err(JwtError::ExpiredToken)
        ));
    }

    #[test]
    fn test_current_user_permissions() {
        let user = CurrentUser {
            id: "att1".to_string(),
            name: "Ravi".to_string(),
            role: Role::Attendant,
            permissions: vec!["menu:view".to_string(), "orders:*".to_string()],
        };

        assert!(user.has_permission("menu:view"));
        assert!(user.has_permission("orders:update_status"));
        assert!(!user.has_permission("reports:view"));
        assert!(!user.has_permission("ordersx:place"));
        assert!(user.owns_or_has("att1", "reports:view"));
        assert!(!user.owns_or_has("someone", "reports:view"));
    }

    #[test]
    fn test_all_permission() {
        let manager = CurrentUser {
            id: "boss".to_string(),
            name: "Boss".to_string(),
            role: Role::Manager,
            permissions: vec!["all".to_string()],
        };
        assert!(manager.has_permission("users:manage"));
        assert!(manager.has_permission("reports:view"));
    }

    #[test]
    fn test_printable_secret() {
        let a = generate_secure_printable_jwt_secret().unwrap();
        let b = generate_secure_printable_jwt_secret().unwrap();
        assert_eq!(a.len(), 64);
        assert_ne!(a, b);
    }

    #[test]
    fn test_extract_from_header() {
        assert_eq!(JwtService::extract_from_header("Bearer abc"), Some("abc"));
        assert_eq!(JwtService::extract_from_header("Basic abc"), None);
    }
}
