use axum::{http::StatusCode, response::IntoResponse, response::Response, Json};
use serde::Serialize;

pub const SUCCESS: &str = "success";
pub const FAILURE: &str = "failure";

/// `{notification, message}` body used for every non-data reply.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub notification: String,
    pub message: String,
}

impl MessageResponse {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            notification: SUCCESS.to_string(),
            message: message.into(),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            notification: FAILURE.to_string(),
            message: message.into(),
        }
    }

    pub fn with_status(self, status: StatusCode) -> Response {
        (status, Json(self)).into_response()
    }
}
