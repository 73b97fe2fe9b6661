//! Quotation record types.
//!
//! A quotation is identified by a caller-supplied quotation number and
//! consists of one customer record plus one or more item rows. Both tables
//! are column-ordered; the constants here pin the order the service appends
//! cells in.

use serde::{Deserialize, Serialize};

use crate::store::Record;

/// Item-table columns, in append order.
pub const ITEM_COLUMNS: [&str; 6] = [
    "quotation_no",
    "category",
    "product_id",
    "name",
    "price",
    "quantity",
];

/// Customer-table columns, in append order.
pub const CUSTOMER_COLUMNS: [&str; 7] = [
    "quotation_no",
    "customer_name",
    "email",
    "phone",
    "company",
    "address",
    "notes",
];

/// Incoming add-quotation payload. Every field is optional by contract;
/// missing fields become empty cells.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct QuotePayload {
    pub quotation_no: Option<String>,
    pub category: Option<String>,
    pub product_id: Option<String>,
    pub name: Option<String>,
    pub price: Option<String>,
    pub quantity: Option<String>,
    pub customer_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub address: Option<String>,
    pub notes: Option<String>,
}

impl QuotePayload {
    /// The quotation number the payload refers to; missing maps to empty.
    pub fn quotation_no(&self) -> &str {
        self.quotation_no.as_deref().unwrap_or_default()
    }

    /// Item-table row, cells ordered per [`ITEM_COLUMNS`].
    pub fn item_row(&self) -> Vec<String> {
        [
            &self.quotation_no,
            &self.category,
            &self.product_id,
            &self.name,
            &self.price,
            &self.quantity,
        ]
        .into_iter()
        .map(|f| f.clone().unwrap_or_default())
        .collect()
    }

    /// Customer-table row, cells ordered per [`CUSTOMER_COLUMNS`].
    pub fn customer_row(&self) -> Vec<String> {
        [
            &self.quotation_no,
            &self.customer_name,
            &self.email,
            &self.phone,
            &self.company,
            &self.address,
            &self.notes,
        ]
        .into_iter()
        .map(|f| f.clone().unwrap_or_default())
        .collect()
    }
}

/// Customer sub-record of a fetched quotation. Every field defaults to the
/// empty string when no customer row matched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Customer {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub company: String,
    pub address: String,
    pub notes: String,
}

impl Customer {
    /// Build from a customer-table record, defaulting absent fields.
    pub fn from_record(record: &Record) -> Self {
        let field = |name: &str| record.get(name).cloned().unwrap_or_default();
        Self {
            name: field("customer_name"),
            email: field("email"),
            phone: field("phone"),
            company: field("company"),
            address: field("address"),
            notes: field("notes"),
        }
    }
}

/// A fetched quotation: the customer plus the matched item rows, each
/// carrying whatever fields were stored.
#[derive(Debug, Clone, Serialize)]
pub struct Quotation {
    pub customer: Customer,
    pub items: Vec<Record>,
}
