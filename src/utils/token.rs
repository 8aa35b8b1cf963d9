// src/utils/token.rs

use std::time::{SystemTime, UNIX_EPOCH};

use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Claims carried by a locally-minted ID token.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct IdTokenClaims {
    /// Subject - the account uid.
    pub sub: String,
    /// Sign-in provider id (e.g. 'password', 'google.com').
    pub provider: String,
    /// Issued-at time as Unix timestamp.
    pub iat: usize,
    /// Expiration time as Unix timestamp.
    pub exp: usize,
}

/// Signs a new ID token for the account.
pub fn sign_id_token(
    uid: &str,
    provider: &str,
    secret: &str,
    expiration_seconds: u64,
) -> Result<String, AppError> {
    let issued_at = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|e| AppError::Internal(e.to_string()))?
        .as_secs() as usize;

    let claims = IdTokenClaims {
        sub: uid.to_string(),
        provider: provider.to_owned(),
        iat: issued_at,
        exp: issued_at + expiration_seconds as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(e.to_string()))
}

/// Verifies and decodes an ID token string.
///
/// Returns the `IdTokenClaims` if the token is intact and unexpired.
pub fn verify_id_token(token: &str, secret: &str) -> Result<IdTokenClaims, AppError> {
    let token_data = decode(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|_| AppError::Auth("Invalid token".to_string()))?;

    Ok(token_data.claims)
}
