use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::Role,
};

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct Claims {
    pub sub: String,
    pub username: String,
    pub email: String,
    pub role: Role,
    pub iat: i64,
    pub exp: i64,
}

/// Mints and verifies HS256 session tokens.
#[derive(Clone)]
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl TokenService {
    pub fn new(secret: &str, ttl_secs: i64) -> Self {
        let mut validation = Validation::default();
        validation.leeway = 0;
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            ttl: Duration::seconds(ttl_secs),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn mint(&self, principal: &AuthUser) -> AppResult<String> {
        self.mint_at(principal, Utc::now())
    }

    /// Mint a token as if issued at `issued_at`.
    pub fn mint_at(&self, principal: &AuthUser, issued_at: DateTime<Utc>) -> AppResult<String> {
        let expires_at = issued_at
            .checked_add_signed(self.ttl)
            .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Failed to set expiration")))?;

        let claims = Claims {
            sub: principal.user_id.to_string(),
            username: principal.username.clone(),
            email: principal.email.clone(),
            role: principal.role,
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding)
            .map_err(|e| AppError::Internal(anyhow::anyhow!(e.to_string())))
    }

    /// Verify signature and expiry. Every failure looks the same to the caller.
    pub fn authenticate(&self, token: &str) -> AppResult<AuthUser> {
        let decoded = decode::<Claims>(token, &self.decoding, &self.validation)
            .map_err(|_| AppError::Unauthorized("Invalid or expired token"))?;

        let user_id = Uuid::parse_str(&decoded.claims.sub)
            .map_err(|_| AppError::Unauthorized("Invalid or expired token"))?;

        Ok(AuthUser {
            user_id,
            username: decoded.claims.username,
            email: decoded.claims.email,
            role: decoded.claims.role,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn principal(role: Role) -> AuthUser {
        AuthUser {
            user_id: Uuid::new_v4(),
            username: "alice".into(),
            email: "alice@x.com".into(),
            role,
        }
    }

    #[test]
    fn round_trip_recovers_principal() {
        let tokens = TokenService::new("test-secret", 3600);
        for role in [Role::Customer, Role::Admin] {
            let user = principal(role);
            let token = tokens.mint(&user).expect("mint");
            let decoded = tokens.authenticate(&token).expect("authenticate");
            assert_eq!(decoded.user_id, user.user_id);
            assert_eq!(decoded.role, role);
            assert_eq!(decoded.username, "alice");
            assert_eq!(decoded.email, "alice@x.com");
        }
    }

    #[test]
    fn expired_token_is_rejected() {
        let tokens = TokenService::new("test-secret", 3600);
        let issued = Utc::now() - Duration::hours(2);
        let token = tokens
            .mint_at(&principal(Role::Admin), issued)
            .expect("mint");
        let err = tokens.authenticate(&token).unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(_)));
    }

    #[test]
    fn token_just_inside_window_is_accepted() {
        let tokens = TokenService::new("test-secret", 3600);
        let issued = Utc::now() - Duration::minutes(59);
        let token = tokens
            .mint_at(&principal(Role::Customer), issued)
            .expect("mint");
        assert!(tokens.authenticate(&token).is_ok());
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let minted = TokenService::new("secret-a", 3600)
            .mint(&principal(Role::Admin))
            .expect("mint");
        let err = TokenService::new("secret-b", 3600)
            .authenticate(&minted)
            .unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(_)));
    }

    #[test]
    fn malformed_and_tampered_tokens_fail_the_same_way() {
        let tokens = TokenService::new("test-secret", 3600);
        let minted = tokens.mint(&principal(Role::Customer)).expect("mint");
        let mut tampered = minted.clone();
        tampered.push('x');

        for token in ["", "not-a-jwt", "a.b.c", tampered.as_str()] {
            let err = tokens.authenticate(token).unwrap_err();
            assert_eq!(err.to_string(), "Unauthorized: Invalid or expired token");
        }
    }
}
