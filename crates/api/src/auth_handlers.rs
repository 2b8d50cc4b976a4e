use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::middleware::{bearer_token, unauthenticated, AuthUser};
use crate::response::{MessageResponse, SUCCESS};
use crate::AppState;
use auth::{AuthOutcome, Credentials, NewUser, User};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfoResponse {
    pub notification: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub token: String,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct IdentityResponse {
    pub notification: String,
    pub email: String,
    pub message: String,
}

fn internal_error() -> Response {
    MessageResponse::failure("Internal server error").with_status(StatusCode::INTERNAL_SERVER_ERROR)
}

/// Issue a token for `user` and build the identity+token reply.
fn issue_for(state: &AppState, user: User, status: StatusCode, message: &str) -> Response {
    match state.issuer.issue(&user.email) {
        Ok(token) => {
            let response = UserInfoResponse {
                notification: SUCCESS.to_string(),
                first_name: user.first_name,
                last_name: user.last_name,
                email: user.email,
                token,
                message: message.to_string(),
            };
            (status, Json(response)).into_response()
        }
        Err(e) => {
            tracing::error!(email = %user.email, error = %e, "Token issuance failed");
            internal_error()
        }
    }
}

/// POST /api/v1/public/register
pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<RegisterRequest>,
) -> Response {
    if payload.email.trim().is_empty() || payload.password.is_empty() {
        return MessageResponse::failure("Email and password are required")
            .with_status(StatusCode::BAD_REQUEST);
    }

    let candidate = NewUser {
        email: payload.email,
        first_name: payload.first_name,
        last_name: payload.last_name,
        password: payload.password,
    };

    match state.auth_service.register(candidate).await {
        AuthOutcome::Success(user) => issue_for(
            &state,
            user,
            StatusCode::CREATED,
            "The User was registered successfully",
        ),
        AuthOutcome::Failure(reason) => {
            MessageResponse::failure(reason.to_string()).with_status(StatusCode::CONFLICT)
        }
        AuthOutcome::Error(e) => {
            tracing::error!(error = %e, "Registration failed");
            internal_error()
        }
    }
}

/// POST /api/v1/public/login
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<LoginRequest>,
) -> Response {
    let attempt = Credentials {
        email: payload.email,
        password: payload.password,
    };

    match state.auth_service.login(attempt).await {
        AuthOutcome::Success(user) => {
            issue_for(&state, user, StatusCode::OK, "User logged in successfully")
        }
        AuthOutcome::Failure(reason) => {
            MessageResponse::failure(reason.to_string()).with_status(StatusCode::CONFLICT)
        }
        AuthOutcome::Error(e) => {
            tracing::error!(error = %e, "Login failed");
            internal_error()
        }
    }
}

/// POST /api/v1/logout - Revoke the presented token until it expires
pub async fn logout(
    State(state): State<Arc<AppState>>,
    AuthUser(identity): AuthUser,
    headers: HeaderMap,
) -> Response {
    let Some(token) = bearer_token(&headers) else {
        return unauthenticated();
    };

    state.revocations.revoke_until(token, identity.expires_at);
    tracing::info!(email = %identity.email, "Token revoked on logout");

    MessageResponse::success("Logged out successfully").with_status(StatusCode::OK)
}

/// GET /api/v1/me - Report who the bearer token belongs to
pub async fn me(AuthUser(identity): AuthUser) -> impl IntoResponse {
    let response = IdentityResponse {
        notification: SUCCESS.to_string(),
        email: identity.email,
        message: "Authenticated".to_string(),
    };
    (StatusCode::OK, Json(response))
}
