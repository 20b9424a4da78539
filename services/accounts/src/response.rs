//! Success-response envelope: `{success, statusCode, message, data}`.

use axum::Json;
use axum::http::StatusCode;
use serde::Serialize;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    pub status_code: u16,
    pub message: String,
    pub data: T,
}

/// Wrap a payload in the success envelope with the given status.
pub fn ok<T: Serialize>(
    status: StatusCode,
    message: &str,
    data: T,
) -> (StatusCode, Json<ApiResponse<T>>) {
    (
        status,
        Json(ApiResponse {
            success: true,
            status_code: status.as_u16(),
            message: message.to_owned(),
            data,
        }),
    )
}
