//! `quotevend-quotations` — quotation domain: records, the tabular-store
//! port, and the service implementing add/get/list over it.

pub mod records;
pub mod service;
pub mod store;

pub use records::{Customer, QuotePayload, Quotation, CUSTOMER_COLUMNS, ITEM_COLUMNS};
pub use service::{QuotationService, ServiceError, ServiceResult};
pub use store::{InMemoryTable, Record, StoreError, StoreResult, Table, UnavailableTable};
