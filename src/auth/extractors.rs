use axum::{
    async_trait,
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
    middleware::Next,
    response::Response,
};
use tracing::{debug, warn};

use super::{claims::AuthContext, jwt::JwtKeys};
use crate::error::AppError;

/// Route layer for protected routes: rejects the request unless it carries a
/// valid bearer token, otherwise attaches an [`AuthContext`] for the handler.
pub async fn verify_token(
    State(keys): State<JwtKeys>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = bearer_token(req.headers())?;

    let claims = keys.verify(token).map_err(|e| {
        warn!(error = %e, "invalid or expired token");
        AppError::Forbidden("invalid or expired token".into())
    })?;

    let ctx = AuthContext::try_from(&claims).map_err(|e| {
        warn!(error = %e, "token expiry out of range");
        AppError::Forbidden("invalid or expired token".into())
    })?;
    debug!(user_id = %ctx.user_id, expires_at = %ctx.expires_at, "request authenticated");

    req.extensions_mut().insert(ctx);
    Ok(next.run(req).await)
}

fn bearer_token(headers: &HeaderMap) -> Result<&str, AppError> {
    // Read Authorization header
    let auth = headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| AppError::Forbidden("missing Authorization header".into()))?;

    // Expect "Bearer <token>"
    auth.strip_prefix("Bearer ")
        .or_else(|| auth.strip_prefix("bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| AppError::Forbidden("invalid auth scheme".into()))
}

/// The caller's identity, available only behind [`verify_token`].
pub struct AuthUser(pub AuthContext);

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthContext>()
            .copied()
            .map(AuthUser)
            .ok_or_else(|| AppError::Forbidden("authentication required".into()))
    }
}
