//! Admin authentication middleware
//!
//! Every engine route is an administrator action. Tokens are issued by the
//! surrounding platform; this service only verifies them (HS256, shared
//! secret) and requires the `admin` role.

use axum::{
    body::Body,
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts},
    middleware::Next,
    response::Response,
};
use jsonwebtoken::{DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    constants::{BEARER_PREFIX, roles},
    error::{AppError, AppResult},
    state::AppState,
};

/// JWT claims accepted by the admin API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub role: String,
    pub exp: i64,
}

/// Administrator extracted from a verified token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthenticatedAdmin {
    pub subject: String,
}

impl<S> FromRequestParts<S> for AuthenticatedAdmin
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedAdmin>()
            .cloned()
            .ok_or(AppError::Unauthorized)
    }
}

/// Verify a JWT and extract its claims
pub fn verify_token(token: &str, secret: &str) -> AppResult<Claims> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )?;

    Ok(token_data.claims)
}

/// Require a valid admin bearer token
pub async fn admin_middleware(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let path = request.uri().path().to_string();

    let Some(auth_header) = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
    else {
        debug!(path = %path, "Auth failed: No Authorization header");
        return Err(AppError::Unauthorized);
    };

    let Some(token) = auth_header.strip_prefix(BEARER_PREFIX) else {
        debug!(path = %path, "Auth failed: expected 'Bearer <token>'");
        return Err(AppError::Unauthorized);
    };

    let claims = verify_token(token, &state.config().jwt.secret).inspect_err(|e| {
        debug!(path = %path, error = ?e, "Auth failed: Token verification failed");
    })?;

    if claims.role != roles::ADMIN {
        debug!(path = %path, sub = %claims.sub, role = %claims.role, "Auth failed: not an admin");
        return Err(AppError::Forbidden(
            "Engine operations are restricted to administrators".to_string(),
        ));
    }

    debug!(path = %path, sub = %claims.sub, "Admin authenticated");

    request.extensions_mut().insert(AuthenticatedAdmin {
        subject: claims.sub,
    });
    Ok(next.run(request).await)
}
