use axum::{
    routing::{get, post},
    Router,
};

pub mod quotations;
pub mod system;

pub fn router() -> Router {
    Router::new()
        .route("/", get(system::index))
        .route("/health", get(system::health))
        .route("/add_product", post(quotations::add_product))
        .route("/quotation/:quotation_no", get(quotations::get_quotation))
        .route("/quotation_list", get(quotations::quotation_list))
        .route(
            "/latest_quotation_no",
            get(quotations::latest_quotation_no),
        )
}
