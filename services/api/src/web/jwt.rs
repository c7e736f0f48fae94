//! services/api/src/web/jwt.rs
//!
//! Stateless bearer session tokens. Validity is determined purely by
//! signature and expiry; nothing is persisted server-side and there is
//! no revocation.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// The claims embedded in a session token. Serialized field names match
/// the JSON the client reads back from `/api/auth/verify`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Claims {
    /// The user id.
    pub sub: Uuid,
    pub first_name: String,
    pub last_name: String,
    /// Expiration time (unix seconds).
    pub exp: i64,
    /// Issued at (unix seconds).
    pub iat: i64,
}

impl Claims {
    pub fn new(user_id: Uuid, first_name: String, last_name: String, ttl_days: i64) -> Self {
        let now = Utc::now();
        let exp = now + Duration::days(ttl_days);

        Self {
            sub: user_id,
            first_name,
            last_name,
            exp: exp.timestamp(),
            iat: now.timestamp(),
        }
    }
}

pub fn issue_token(claims: &Claims, secret: &str) -> Result<String, jsonwebtoken::errors::Error> {
    encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(secret.as_ref()),
    )
}

pub fn verify_token(token: &str, secret: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
    let validation = Validation::default();
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_ref()),
        &validation,
    )?;

    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_round_trips_claims() {
        let user_id = Uuid::new_v4();
        let claims = Claims::new(user_id, "Ada".into(), "Lovelace".into(), 30);
        let token = issue_token(&claims, "secret").expect("issue token");

        let decoded = verify_token(&token, "secret").expect("verify token");
        assert_eq!(decoded.sub, user_id);
        assert_eq!(decoded.first_name, "Ada");
        assert_eq!(decoded.last_name, "Lovelace");
        assert_eq!(decoded.exp, claims.exp);
    }

    #[test]
    fn expired_token_is_rejected() {
        let mut claims = Claims::new(Uuid::new_v4(), "Ada".into(), "Lovelace".into(), 30);
        claims.exp = (Utc::now() - Duration::hours(2)).timestamp();
        let token = issue_token(&claims, "secret").unwrap();

        assert!(verify_token(&token, "secret").is_err());
    }

    #[test]
    fn token_signed_with_a_different_secret_is_rejected() {
        let claims = Claims::new(Uuid::new_v4(), "Ada".into(), "Lovelace".into(), 30);
        let token = issue_token(&claims, "secret-a").unwrap();

        assert!(verify_token(&token, "secret-b").is_err());
    }
}
