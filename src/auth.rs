use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, request::Parts},
};
use chrono::{Duration, Utc};
use headers::{Authorization, HeaderMapExt, authorization::Bearer};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};

use crate::{
    errors::AppError,
    models::{Admin, Claims},
    state::AppState,
};

/// Cost used when hashing seeded admin passwords.
pub const PASSWORD_COST: u32 = bcrypt::DEFAULT_COST;

pub fn generate_jwt(admin: &Admin, secret: &str, ttl_days: i64) -> Result<String, AppError> {
    let expiration = (Utc::now() + Duration::days(ttl_days)).timestamp() as usize;
    let claims = Claims {
        admin_id: admin.id,
        username: admin.username.clone(),
        exp: expiration,
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_ref()),
    )
    .map_err(AppError::JwtError)
}

/// Checks signature and expiry.
pub fn decode_jwt(token: &str, secret: &str) -> Result<Claims, AppError> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::new(Algorithm::HS256),
    )?;

    Ok(token_data.claims)
}

pub fn hash_password(password: &str, cost: u32) -> Result<String, AppError> {
    Ok(bcrypt::hash(password, cost)?)
}

/// A malformed stored hash counts as a mismatch, not a server error.
pub fn verify_password(password: &str, password_hash: &str) -> bool {
    bcrypt::verify(password, password_hash).unwrap_or_else(|e| {
        tracing::warn!("Stored password hash could not be checked: {}", e);
        false
    })
}

/// Resolves write permission from request headers. `Ok(None)` when the
/// write guard is off.
pub fn check_write_access(state: &AppState, headers: &HeaderMap) -> Result<Option<Claims>, AppError> {
    if !state.config.require_write_auth {
        return Ok(None);
    }

    let Authorization(bearer) = headers
        .typed_get::<Authorization<Bearer>>()
        .ok_or_else(|| AppError::Unauthorized("Missing or invalid Authorization header".into()))?;

    let claims = decode_jwt(bearer.token(), &state.config.jwt_secret)
        .map_err(|_| AppError::Unauthorized("Invalid or expired token".into()))?;

    Ok(Some(claims))
}

/// Write permission for mutating requests. Carries the caller's claims when
/// the write guard is on.
pub struct WriteAccess(pub Option<Claims>);

impl FromRequestParts<AppState> for WriteAccess {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        check_write_access(state, &parts.headers).map(WriteAccess)
    }
}
