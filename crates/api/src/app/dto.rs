use serde::Deserialize;

use quotevend_quotations::Quotation;

// -------------------------
// Query DTOs
// -------------------------

#[derive(Debug, Deserialize)]
pub struct QuotationListQuery {
    pub status: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LatestQuotationQuery {
    pub prefix: Option<String>,
}

// -------------------------
// JSON mapping helpers
// -------------------------

pub fn quotation_to_json(q: Quotation) -> serde_json::Value {
    serde_json::json!({
        "customer": {
            "name": q.customer.name,
            "email": q.customer.email,
            "phone": q.customer.phone,
            "company": q.customer.company,
            "address": q.customer.address,
            "notes": q.customer.notes,
        },
        "items": q.items,
    })
}
