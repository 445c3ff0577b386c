use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::Response,
};
use tracing::{debug, warn};

use super::{AuthError, Claims};
use crate::errors::AppError;
use crate::state::AppState;

/// Verified identity attached to the request by `require_auth`.
/// Handlers behind the gate read it with `Extension<AuthUser>`.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

/// Rejects the request unless it carries a valid `Authorization: Bearer` token.
/// Every rejection is the same 401; the reason only reaches the logs.
pub async fn require_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let Some(token) = bearer_token(req.headers()) else {
        debug!("Rejected {}: no bearer token", req.uri().path());
        return Err(AuthError::Unauthenticated.into());
    };

    let claims = match state.auth.verify_token(token) {
        Ok(claims) => claims,
        Err(AuthError::Expired) => {
            warn!("Rejected {}: token expired", req.uri().path());
            return Err(AuthError::Unauthenticated.into());
        }
        Err(e) => {
            warn!("Rejected {}: {e}", req.uri().path());
            return Err(AuthError::Unauthenticated.into());
        }
    };

    req.extensions_mut().insert(AuthUser(claims));
    Ok(next.run(req).await)
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.trim().split_once(' ')?;
    let token = token.trim();
    if !scheme.eq_ignore_ascii_case("bearer") || token.is_empty() {
        return None;
    }
    Some(token)
}
