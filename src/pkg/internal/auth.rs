use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use axum::http::StatusCode;
use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use standard_error::{Interpolate, StandardError, Status};

use crate::{
    pkg::internal::adaptors::users::spec::{UserEntry, UserRole},
    prelude::Result,
};

const ACCESS_TTL_MINUTES: i64 = 60;
const REFRESH_TTL_MINUTES: i64 = 7 * 24 * 60;

/// The authenticated caller, attached to requests by the authn middleware.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: i32,
    pub email: String,
    pub username: String,
    pub role: UserRole,
}

impl From<&UserEntry> for AuthUser {
    fn from(user: &UserEntry) -> Self {
        AuthUser {
            id: user.id,
            email: user.email.clone(),
            username: user.username.clone(),
            role: user.role,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Access,
    Refresh,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: i32,
    pub email: String,
    pub username: String,
    pub role: UserRole,
    pub token_type: TokenKind,
    pub exp: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TokenPair {
    pub access: String,
    pub refresh: String,
}

fn issue(user: &UserEntry, kind: TokenKind, ttl_minutes: i64, secret: &str) -> Result<String> {
    let exp = Utc::now()
        .checked_add_signed(chrono::Duration::minutes(ttl_minutes))
        .ok_or_else(|| StandardError::new("ERR-AUTH-004"))?
        .timestamp() as usize;
    let claims = Claims {
        sub: user.id,
        email: user.email.clone(),
        username: user.username.clone(),
        role: user.role,
        token_type: kind,
        exp,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| StandardError::new("ERR-AUTH-004").interpolate_err(e.to_string()))
}

pub fn issue_token_pair(user: &UserEntry, secret: &str) -> Result<TokenPair> {
    Ok(TokenPair {
        access: issue(user, TokenKind::Access, ACCESS_TTL_MINUTES, secret)?,
        refresh: issue(user, TokenKind::Refresh, REFRESH_TTL_MINUTES, secret)?,
    })
}

pub fn issue_access_token(user: &UserEntry, secret: &str) -> Result<String> {
    issue(user, TokenKind::Access, ACCESS_TTL_MINUTES, secret)
}

pub fn verify_token(token: &str, kind: TokenKind, secret: &str) -> Result<Claims> {
    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|_| StandardError::new("ERR-AUTH-002").code(StatusCode::UNAUTHORIZED))?;
    if data.claims.token_type != kind {
        return Err(StandardError::new("ERR-AUTH-002").code(StatusCode::UNAUTHORIZED));
    }
    Ok(data.claims)
}

pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    Ok(Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| StandardError::new("ERR-AUTH-003").interpolate_err(e.to_string()))?
        .to_string())
}

pub fn verify_password(password: &str, hash: &str) -> bool {
    PasswordHash::new(hash)
        .map(|parsed| {
            Argon2::default()
                .verify_password(password.as_bytes(), &parsed)
                .is_ok()
        })
        .unwrap_or(false)
}

/// The original platform defaulted blank usernames to the local part of
/// the email address.
pub fn username_from_email(email: &str) -> String {
    email.split('@').next().unwrap_or(email).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> UserEntry {
        UserEntry {
            id: 7,
            email: "dev@example.com".into(),
            username: "dev".into(),
            password_hash: String::new(),
            full_name: Some("Dev Example".into()),
            country: None,
            role: UserRole::Freelancer,
            bio: None,
            profile_picture_key: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn password_hash_roundtrip() {
        let hash = hash_password("hunter22").unwrap();
        assert!(verify_password("hunter22", &hash));
        assert!(!verify_password("hunter23", &hash));
    }

    #[test]
    fn malformed_hash_never_verifies() {
        assert!(!verify_password("hunter22", "not-a-phc-string"));
    }

    #[test]
    fn token_pair_roundtrip() {
        let pair = issue_token_pair(&user(), "test-secret").unwrap();
        let claims = verify_token(&pair.access, TokenKind::Access, "test-secret").unwrap();
        assert_eq!(claims.sub, 7);
        assert_eq!(claims.role, UserRole::Freelancer);
        let claims = verify_token(&pair.refresh, TokenKind::Refresh, "test-secret").unwrap();
        assert_eq!(claims.token_type, TokenKind::Refresh);
    }

    #[test]
    fn refresh_token_is_not_an_access_token() {
        let pair = issue_token_pair(&user(), "test-secret").unwrap();
        assert!(verify_token(&pair.refresh, TokenKind::Access, "test-secret").is_err());
        assert!(verify_token(&pair.access, TokenKind::Refresh, "test-secret").is_err());
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let pair = issue_token_pair(&user(), "test-secret").unwrap();
        assert!(verify_token(&pair.access, TokenKind::Access, "other-secret").is_err());
    }

    #[test]
    fn blank_usernames_default_from_email() {
        assert_eq!(username_from_email("jane.doe@example.com"), "jane.doe");
        assert_eq!(username_from_email("no-at-sign"), "no-at-sign");
    }
}
