use axum::{
    extract::{Request, State},
    http::{HeaderMap, StatusCode, header::AUTHORIZATION},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

use crate::AppState;
use crate::response::MessageResponse;
use auth::{Identity, TokenStatus};

/// Return the token after `Bearer ` in the Authorization header, if any.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
}

/// Runs on every request.
///
/// Requests without a bearer token pass through anonymous. A revoked token is
/// answered with 401 and not forwarded. Any other bad token (expired, bad
/// signature, malformed) also leaves the request anonymous; protected routes
/// then refuse it through [`require_auth`].
pub async fn authenticate(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Response {
    let status = bearer_token(request.headers()).map(|token| state.validator.inspect(token));
    let Some(status) = status else {
        return next.run(request).await;
    };

    match status {
        TokenStatus::Valid(claims) => {
            tracing::debug!(email = %claims.sub, "Bearer token accepted");
            request.extensions_mut().insert(claims.identity());
        }
        TokenStatus::Revoked => {
            tracing::info!(path = %request.uri().path(), "Rejected revoked bearer token");
            return MessageResponse::failure("Token not valid")
                .with_status(StatusCode::UNAUTHORIZED);
        }
        TokenStatus::Expired => {
            tracing::debug!("Bearer token expired; continuing anonymously");
        }
        TokenStatus::BadSignature => {
            tracing::debug!("Bearer token signature mismatch; continuing anonymously");
        }
        TokenStatus::Malformed(reason) => {
            tracing::debug!(%reason, "Malformed bearer token; continuing anonymously");
        }
    }

    next.run(request).await
}

/// Refuse requests that [`authenticate`] left anonymous.
pub async fn require_auth(request: Request, next: Next) -> Result<Response, Response> {
    if request.extensions().get::<Identity>().is_none() {
        return Err(unauthenticated());
    }
    Ok(next.run(request).await)
}

pub fn unauthenticated() -> Response {
    MessageResponse::failure("Authentication required").with_status(StatusCode::UNAUTHORIZED)
}

/// Extractor for the authenticated identity.
/// Use this in handlers that are protected by auth middleware
#[derive(Debug, Clone)]
pub struct AuthUser(pub Identity);

impl<S> axum::extract::FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Identity>()
            .cloned()
            .map(AuthUser)
            .ok_or_else(unauthenticated)
    }
}
