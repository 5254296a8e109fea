use crate::error::{AppError, AppResult};
use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

pub const ADMIN_ROLE: &str = "admin";

#[derive(Debug, Serialize, Deserialize)]
pub struct SessionClaims {
    pub role: String,
    pub exp: i64,
    pub iat: i64,
}

/// 管理端会话令牌签发与校验（HS256，单一 admin 角色）
#[derive(Clone)]
pub struct SessionService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    expires_in: i64,
}

impl SessionService {
    pub fn new(secret: &str, expires_in: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            expires_in,
        }
    }

    pub fn issue_admin_token(&self) -> AppResult<String> {
        let now = Utc::now();
        let exp = now + Duration::seconds(self.expires_in);

        let claims = SessionClaims {
            role: ADMIN_ROLE.to_string(),
            exp: exp.timestamp(),
            iat: now.timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding_key).map_err(AppError::JwtError)
    }

    pub fn verify_admin_token(&self, token: &str) -> AppResult<SessionClaims> {
        let validation = Validation::new(Algorithm::HS256);
        let claims = decode::<SessionClaims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(AppError::JwtError)?;

        if claims.role != ADMIN_ROLE {
            return Err(AppError::AuthError("Invalid session role".to_string()));
        }

        Ok(claims)
    }

    pub fn expires_in(&self) -> i64 {
        self.expires_in
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_and_verify_round_trip() {
        let service = SessionService::new("test-secret", 3600);
        let token = service.issue_admin_token().unwrap();
        let claims = service.verify_admin_token(&token).unwrap();
        assert_eq!(claims.role, ADMIN_ROLE);
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let issuer = SessionService::new("secret-a", 3600);
        let verifier = SessionService::new("secret-b", 3600);
        let token = issuer.issue_admin_token().unwrap();
        assert!(verifier.verify_admin_token(&token).is_err());
    }
}
