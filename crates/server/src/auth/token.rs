use crate::error::AppError;
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use models::role::Role;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Claims carried by every access token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// The user id
    pub sub: Uuid,
    pub role: Role,
    pub iat: i64,
    pub exp: i64,
}

/// HS256 signing and verification keys with the configured token lifetime
pub struct TokenKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl TokenKeys {
    pub fn new(secret: &[u8], ttl_seconds: i64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            ttl: Duration::seconds(ttl_seconds),
        }
    }

    /// Issues a signed token for the given user
    ///
    /// The role is embedded in the claims and trusted by the extractors until
    /// the token expires; roles are fixed once an account is created.
    pub fn issue(&self, user_id: Uuid, role: Role) -> Result<String, AppError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id,
            role,
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };

        self.sign(&claims)
    }

    fn sign(&self, claims: &Claims) -> Result<String, AppError> {
        encode(&Header::default(), claims, &self.encoding)
            .map_err(|e| AppError::Internal(format!("failed to sign token: {e}")))
    }

    /// Verifies a token's signature and expiry and returns its claims
    pub fn verify(&self, token: &str) -> Result<Claims, AppError> {
        decode::<Claims>(token, &self.decoding, &Validation::default())
            .map(|data| data.claims)
            .map_err(|_| AppError::Unauthorized("Invalid or expired token".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &[u8] = b"test-secret-of-sufficient-length";

    #[test]
    fn test_issue_and_verify() {
        let keys = TokenKeys::new(SECRET, 3600);
        let user_id = Uuid::new_v4();

        let token = keys.issue(user_id, Role::Parent).unwrap();
        let claims = keys.verify(&token).unwrap();

        assert_eq!(claims.sub, user_id);
        assert_eq!(claims.role, Role::Parent);
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn test_rejects_foreign_signature() {
        let token = TokenKeys::new(SECRET, 3600)
            .issue(Uuid::new_v4(), Role::Admin)
            .unwrap();
        let other = TokenKeys::new(b"a-completely-different-secret", 3600);

        assert!(matches!(other.verify(&token), Err(AppError::Unauthorized(_))));
        assert!(other.verify("not.a.token").is_err());
    }

    #[test]
    fn test_rejects_expired_token() {
        let keys = TokenKeys::new(SECRET, 3600);
        let issued = Utc::now() - Duration::hours(2);
        let claims = Claims {
            sub: Uuid::new_v4(),
            role: Role::Student,
            iat: issued.timestamp(),
            exp: (issued + Duration::minutes(5)).timestamp(),
        };
        let token = keys.sign(&claims).unwrap();

        assert!(keys.verify(&token).is_err());
    }
}
