use axum::http::StatusCode;
use axum::response::Html;

pub async fn health() -> StatusCode {
    StatusCode::OK
}

/// The quotation form. Assets it references are served under `/static`.
pub async fn index() -> Html<&'static str> {
    Html(include_str!("../../../templates/index.html"))
}
