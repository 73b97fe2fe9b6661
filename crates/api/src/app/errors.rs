use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use quotevend_quotations::ServiceError;

/// Two error kinds reach clients: 404 for a quotation with no item rows,
/// 500 (with the cause echoed) for everything the store reports.
pub fn service_error_to_response(err: ServiceError) -> axum::response::Response {
    match err {
        ServiceError::NotFound => {
            json_error(StatusCode::NOT_FOUND, "not_found", "Quotation not found")
        }
        ServiceError::Store(e) => {
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "store_error", e.to_string())
        }
    }
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
