use axum::{
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::Serialize;

use crate::response::SUCCESS;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InfoResponse {
    pub notification: String,
    pub forwarded_for: Option<String>,
    pub forwarded_proto: Option<String>,
    pub message: String,
}

fn header_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

/// GET /api/v1/public/get-info - Echo the proxy forwarding headers
pub async fn get_info(headers: HeaderMap) -> impl IntoResponse {
    let response = InfoResponse {
        notification: SUCCESS.to_string(),
        forwarded_for: header_value(&headers, "x-forwarded-for"),
        forwarded_proto: header_value(&headers, "x-forwarded-proto"),
        message: "Network Information returned successfully".to_string(),
    };
    (StatusCode::OK, Json(response))
}
