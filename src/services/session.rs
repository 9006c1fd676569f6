//! Session token decoding.
//!
//! Tokens are issued by the external auth provider and signed with a secret
//! shared with this service. Only decoding happens here.

use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;

/// Claims carried by a dashboard session token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SessionClaims {
    pub sub: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    pub exp: i64,
    #[serde(default)]
    pub iat: i64,
}

/// Validate a session token and return its claims.
pub fn decode_session(token: &str, secret: &str) -> Result<SessionClaims, AppError> {
    let decoding_key = DecodingKey::from_secret(secret.as_bytes());
    let validation = Validation::new(Algorithm::HS256);

    jsonwebtoken::decode::<SessionClaims>(token, &decoding_key, &validation)
        .map(|data| data.claims)
        .map_err(|e| {
            tracing::debug!(error = %e, "Session token rejected");
            AppError::Unauthorized
        })
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use jsonwebtoken::{EncodingKey, Header};

    pub(crate) fn sign(sub: &str, secret: &str, ttl_secs: i64) -> String {
        let now = Utc::now();
        let claims = SessionClaims {
            sub: sub.to_string(),
            email: Some(format!("{sub}@hotel.test")),
            name: Some("Front Desk".to_string()),
            role: Some("MANAGER".to_string()),
            exp: (now + Duration::seconds(ttl_secs)).timestamp(),
            iat: now.timestamp(),
        };
        jsonwebtoken::encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    #[test]
    fn valid_token_decodes() {
        let token = sign("user-1", "shared-secret", 900);
        let claims = decode_session(&token, "shared-secret").unwrap();
        assert_eq!(claims.sub, "user-1");
        assert_eq!(claims.email.as_deref(), Some("user-1@hotel.test"));
    }

    #[test]
    fn wrong_secret_rejected() {
        let token = sign("user-1", "shared-secret", 900);
        let err = decode_session(&token, "other-secret").unwrap_err();
        assert!(err.is_unauthorized());
    }

    #[test]
    fn garbage_token_rejected() {
        assert!(decode_session("garbage.token.here", "secret").is_err());
    }

    #[test]
    fn expired_token_rejected() {
        // Well beyond the 60s leeway window
        let token = sign("user-1", "secret", -3600);
        assert!(decode_session(&token, "secret").is_err());
    }
}
