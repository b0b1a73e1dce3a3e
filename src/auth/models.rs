use axum::{
    extract::FromRequestParts,
    http::{StatusCode, header::AUTHORIZATION, request::Parts},
};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::env;

pub const ACCESS_TOKEN_TTL_HOURS: i64 = 12;

#[derive(Debug, Serialize, Deserialize)]
pub struct AccessTokenClaims {
    pub sub: String,
    pub role: String,
    pub exp: usize,
}

#[derive(Deserialize)]
pub struct LoginPayload {
    pub email: String,
    pub password: String,
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub email: String,
    pub role: String,
}

/// Superadmin accounts come from the environment as comma-separated
/// `email=bcrypt-hash` pairs, never from source.
#[derive(Debug, PartialEq)]
pub struct SuperadminAccount {
    pub email: String,
    pub password_hash: String,
}

pub fn parse_superadmin_accounts(raw: &str) -> Vec<SuperadminAccount> {
    raw.split(',')
        .filter_map(|entry| {
            let (email, hash) = entry.trim().split_once('=')?;
            let email = email.trim().to_lowercase();
            let hash = hash.trim();
            if email.is_empty() || hash.is_empty() {
                return None;
            }
            Some(SuperadminAccount {
                email,
                password_hash: hash.to_owned(),
            })
        })
        .collect()
}

fn jwt_secret() -> Result<String, (StatusCode, String)> {
    env::var("JWT_SECRET").map_err(|e| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("jwt secret must be set: {}", e),
        )
    })
}

pub fn issue_access_token(email: &str, role: &str) -> Result<String, (StatusCode, String)> {
    let secret = jwt_secret()?;
    let exp = chrono::Utc::now() + chrono::Duration::hours(ACCESS_TOKEN_TTL_HOURS);
    let claims = AccessTokenClaims {
        sub: email.to_owned(),
        role: role.to_owned(),
        exp: exp.timestamp() as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Failed to issue token: {}", e),
        )
    })
}

impl<S> FromRequestParts<S> for AccessTokenClaims
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, String);

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .ok_or((
                StatusCode::UNAUTHORIZED,
                "Missing access token".to_owned(),
            ))?;

        let secret = jwt_secret()?;
        let decoded = decode::<AccessTokenClaims>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &Validation::default(),
        )
        .map_err(|_| (StatusCode::UNAUTHORIZED, "Invalid access token".to_owned()))?;

        Ok(decoded.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_email_hash_pairs() {
        let parsed = parse_superadmin_accounts(
            "Hello@Sachioexpress.com=$2b$12$abc, ops@sachioexpress.com=$2b$12$def",
        );
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0].email, "hello@sachioexpress.com");
        assert_eq!(parsed[0].password_hash, "$2b$12$abc");
        assert_eq!(parsed[1].email, "ops@sachioexpress.com");
    }

    #[test]
    fn skips_malformed_entries() {
        assert!(parse_superadmin_accounts("").is_empty());
        assert!(parse_superadmin_accounts("no-separator").is_empty());
        assert!(parse_superadmin_accounts("=hash-only,email-only=").is_empty());
    }
}
