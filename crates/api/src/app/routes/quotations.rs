use std::sync::Arc;

use axum::{
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use quotevend_quotations::QuotePayload;

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub async fn add_product(
    Extension(services): Extension<Arc<AppServices>>,
    Json(payload): Json<QuotePayload>,
) -> axum::response::Response {
    match services.quotations.add_item_and_customer(&payload).await {
        Ok(()) => (
            StatusCode::OK,
            Json(serde_json::json!({ "status": "success" })),
        )
            .into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn get_quotation(
    Extension(services): Extension<Arc<AppServices>>,
    Path(quotation_no): Path<String>,
) -> axum::response::Response {
    match services.quotations.get_quotation(&quotation_no).await {
        Ok(q) => (StatusCode::OK, Json(dto::quotation_to_json(q))).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn quotation_list(
    Extension(services): Extension<Arc<AppServices>>,
    Query(query): Query<dto::QuotationListQuery>,
) -> axum::response::Response {
    // An empty status parameter means no filter, as does its absence.
    let status = query.status.as_deref().filter(|s| !s.is_empty());

    match services.quotations.list_quotation_numbers(status).await {
        Ok(numbers) => (StatusCode::OK, Json(numbers)).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn latest_quotation_no(
    Extension(services): Extension<Arc<AppServices>>,
    Query(query): Query<dto::LatestQuotationQuery>,
) -> axum::response::Response {
    let prefix = query.prefix.unwrap_or_default();

    match services.quotations.latest_quotation_number(&prefix).await {
        Ok(last) => (
            StatusCode::OK,
            Json(serde_json::json!({ "last": last.unwrap_or_default() })),
        )
            .into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}
