use auth::Identity;
use axum::{
    extract::Request,
    http::StatusCode,
    middleware,
    response::Response,
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::middleware::{self as auth_middleware, unauthenticated};
use crate::response::MessageResponse;
use crate::{auth_handlers, info_handlers, AppState};

pub fn router(state: Arc<AppState>) -> Router {
    // Public routes (no authentication required)
    let public_routes = Router::new()
        .route("/public/get-info", get(info_handlers::get_info))
        .route("/public/register", post(auth_handlers::register))
        .route("/public/login", post(auth_handlers::login));

    // Protected routes (require a valid, non-revoked bearer token)
    let protected_routes = Router::new()
        .route("/me", get(auth_handlers::me))
        .route("/logout", post(auth_handlers::logout))
        .route_layer(middleware::from_fn(auth_middleware::require_auth));

    Router::new()
        .nest("/api/v1", public_routes.merge(protected_routes))
        .fallback(fallback)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware::authenticate,
        ))
        .with_state(state)
}

/// Unknown paths are protected too: anonymous callers get 401, others 404.
async fn fallback(request: Request) -> Response {
    if request.extensions().get::<Identity>().is_none() {
        return unauthenticated();
    }
    MessageResponse::failure("Not found").with_status(StatusCode::NOT_FOUND)
}
