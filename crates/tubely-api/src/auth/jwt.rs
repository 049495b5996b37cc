//! HS256 access tokens.
//!
//! The subject claim carries the caller's user id. Tokens are minted by the
//! account service that shares `JWT_SECRET`; `issue_token` exists for tooling
//! and tests.

use chrono::Utc;
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tubely_core::AppError;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtClaims {
    pub sub: Uuid,
    pub iss: String,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    issuer: String,
}

impl JwtService {
    pub fn new(secret: &str, issuer: impl Into<String>) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            issuer: issuer.into(),
        }
    }

    pub fn issue_token(&self, user_id: Uuid, ttl: Duration) -> Result<String, AppError> {
        let now = Utc::now().timestamp();
        let claims = JwtClaims {
            sub: user_id,
            iss: self.issuer.clone(),
            iat: now,
            exp: now + ttl.as_secs() as i64,
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AppError::Internal(format!("Failed to sign token: {}", e)))
    }

    /// Validate signature, issuer and expiry (no leeway).
    pub fn validate_token(&self, token: &str) -> Result<JwtClaims, AppError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[self.issuer.as_str()]);
        validation.validate_exp = true;
        validation.leeway = 0;

        let data = decode::<JwtClaims>(token, &self.decoding_key, &validation).map_err(|e| {
            let reason = match e.kind() {
                ErrorKind::ExpiredSignature => "Token has expired",
                ErrorKind::InvalidIssuer => "Invalid token issuer",
                ErrorKind::InvalidSignature => "Invalid token signature",
                _ => "Invalid token",
            };
            tracing::debug!(error = %e, "Token validation failed");
            AppError::Unauthorized(reason.to_string())
        })?;

        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret-that-is-at-least-32-bytes-long";

    #[test]
    fn test_issue_and_validate() {
        let service = JwtService::new(SECRET, "tubely-access");
        let user_id = Uuid::new_v4();
        let token = service
            .issue_token(user_id, Duration::from_secs(60))
            .unwrap();

        let claims = service.validate_token(&token).unwrap();
        assert_eq!(claims.sub, user_id);
        assert_eq!(claims.iss, "tubely-access");
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let issuer = JwtService::new(SECRET, "tubely-access");
        let other = JwtService::new("another-secret-that-is-also-32-bytes-long", "tubely-access");
        let token = issuer
            .issue_token(Uuid::new_v4(), Duration::from_secs(60))
            .unwrap();

        assert!(matches!(
            other.validate_token(&token),
            Err(AppError::Unauthorized(_))
        ));
    }

    #[test]
    fn test_wrong_issuer_rejected() {
        let issuer = JwtService::new(SECRET, "someone-else");
        let service = JwtService::new(SECRET, "tubely-access");
        let token = issuer
            .issue_token(Uuid::new_v4(), Duration::from_secs(60))
            .unwrap();

        assert!(matches!(
            service.validate_token(&token),
            Err(AppError::Unauthorized(msg)) if msg == "Invalid token issuer"
        ));
    }

    #[test]
    fn test_expired_token_rejected() {
        let service = JwtService::new(SECRET, "tubely-access");
        let now = Utc::now().timestamp();
        let claims = JwtClaims {
            sub: Uuid::new_v4(),
            iss: "tubely-access".to_string(),
            iat: now - 120,
            exp: now - 60,
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();

        assert!(matches!(
            service.validate_token(&token),
            Err(AppError::Unauthorized(msg)) if msg == "Token has expired"
        ));
    }

    #[test]
    fn test_garbage_token_rejected() {
        let service = JwtService::new(SECRET, "tubely-access");
        assert!(service.validate_token("not.a.jwt").is_err());
    }
}
