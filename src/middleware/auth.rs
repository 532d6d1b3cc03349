use std::{fmt, str::FromStr};

use axum::{extract::FromRequestParts, http::header};
use jsonwebtoken::{DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{error::AppError, state::AppState};

/// Roles resolved by the identity provider; this service only reads them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Customer,
    Supplier,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Customer => "customer",
            Role::Supplier => "supplier",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Role::Admin),
            "customer" => Ok(Role::Customer),
            "supplier" => Ok(Role::Supplier),
            _ => Err(AppError::Forbidden),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub role: String,
    pub exp: usize,
}

#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: Uuid,
    pub role: Role,
}

pub fn ensure_role(user: &AuthUser, allowed: &[Role]) -> Result<(), AppError> {
    if !allowed.contains(&user.role) {
        return Err(AppError::Forbidden);
    }
    Ok(())
}

/// Catalog maintenance.
pub fn ensure_admin(user: &AuthUser) -> Result<(), AppError> {
    ensure_role(user, &[Role::Admin])
}

/// Order triage and packing.
pub fn ensure_staff(user: &AuthUser) -> Result<(), AppError> {
    ensure_role(user, &[Role::Admin, Role::Supplier])
}

pub fn decode_token(token: &str, secret: &str) -> Result<AuthUser, AppError> {
    let decoded = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|_| AppError::Unauthorized)?;

    let user_id = Uuid::parse_str(&decoded.claims.sub)
        .map_err(|_| AppError::BadRequest("Invalid user id in token".into()))?;
    let role = decoded.claims.role.parse::<Role>()?;

    Ok(AuthUser { user_id, role })
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .ok_or(AppError::Unauthorized)?;

        let auth_str = auth_header
            .to_str()
            .map_err(|_| AppError::BadRequest("Invalid Authorization header".into()))?;

        let token = auth_str
            .strip_prefix("Bearer ")
            .map(str::trim)
            .ok_or_else(|| AppError::BadRequest("Invalid Authorization scheme".into()))?;

        let secret = state
            .config
            .jwt_secret
            .as_deref()
            .ok_or_else(|| AppError::Internal(anyhow::anyhow!("JWT_SECRET is not set")))?;

        decode_token(token, secret)
    }
}
