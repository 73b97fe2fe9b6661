//! Quotation service: stateless read/append operations over the two tables.

use std::sync::Arc;

use thiserror::Error;

use crate::records::{Customer, QuotePayload, Quotation};
use crate::store::{Record, StoreError, Table};

/// Result type for service operations.
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Service-level error: a quotation with no matching items, or anything the
/// store reported. Nothing is retried; store failures propagate immediately.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("quotation not found")]
    NotFound,

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// The quotation service. Holds the two table handles; every call is a
/// stateless read/append against them.
#[derive(Clone)]
pub struct QuotationService {
    items: Arc<dyn Table>,
    customers: Arc<dyn Table>,
}

impl QuotationService {
    pub fn new(items: Arc<dyn Table>, customers: Arc<dyn Table>) -> Self {
        Self { items, customers }
    }

    /// Append one item row, then append a customer row unless one already
    /// exists for the payload's quotation number (first write wins).
    ///
    /// The existence check and the append are two separate store calls with
    /// no lock between them: concurrent adds with the same fresh quotation
    /// number can both observe "absent" and both append. That matches the
    /// behavior of the system this one replaces; callers must tolerate a
    /// duplicate customer row in that window.
    pub async fn add_item_and_customer(&self, payload: &QuotePayload) -> ServiceResult<()> {
        self.items.append_row(payload.item_row()).await?;

        let quotation_no = payload.quotation_no();
        let existing = self.customers.get_all_records().await?;
        let exists = existing
            .iter()
            .any(|r| field(r, "quotation_no") == quotation_no);

        if !exists {
            self.customers.append_row(payload.customer_row()).await?;
            tracing::debug!(quotation_no, "customer row appended");
        }

        Ok(())
    }

    /// Fetch a quotation: all item rows whose `quotation_no` matches exactly,
    /// plus the first matching customer row (fields default to empty).
    pub async fn get_quotation(&self, quotation_no: &str) -> ServiceResult<Quotation> {
        let items = self.items.get_all_records().await?;
        let matched: Vec<Record> = items
            .into_iter()
            .filter(|r| field(r, "quotation_no") == quotation_no)
            .collect();

        if matched.is_empty() {
            return Err(ServiceError::NotFound);
        }

        let customers = self.customers.get_all_records().await?;
        let customer = customers
            .iter()
            .find(|r| field(r, "quotation_no") == quotation_no)
            .map(Customer::from_record)
            .unwrap_or_default();

        Ok(Quotation {
            customer,
            items: matched,
        })
    }

    /// Distinct non-empty quotation numbers, sorted ascending. An optional
    /// status filter matches each record's `status` field case-insensitively
    /// (records without one compare as empty).
    pub async fn list_quotation_numbers(
        &self,
        status: Option<&str>,
    ) -> ServiceResult<Vec<String>> {
        let records = self.items.get_all_records().await?;
        let status = status.map(str::to_lowercase);

        let mut numbers: Vec<String> = records
            .iter()
            .filter(|r| match &status {
                Some(s) => field(r, "status").to_lowercase() == *s,
                None => true,
            })
            .map(|r| field(r, "quotation_no").to_string())
            .filter(|q| !q.is_empty())
            .collect();

        numbers.sort();
        numbers.dedup();
        Ok(numbers)
    }

    /// Lexicographically greatest quotation number starting with `prefix`,
    /// or `None` when nothing matches.
    pub async fn latest_quotation_number(&self, prefix: &str) -> ServiceResult<Option<String>> {
        let records = self.items.get_all_records().await?;

        let mut matching: Vec<String> = records
            .iter()
            .map(|r| field(r, "quotation_no").to_string())
            .filter(|q| !q.is_empty() && q.starts_with(prefix))
            .collect();

        matching.sort();
        Ok(matching.pop())
    }
}

fn field<'a>(record: &'a Record, name: &str) -> &'a str {
    record.get(name).map(String::as_str).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::{CUSTOMER_COLUMNS, ITEM_COLUMNS};
    use crate::store::InMemoryTable;

    fn payload(quotation_no: &str, name: &str, customer_name: &str) -> QuotePayload {
        QuotePayload {
            quotation_no: Some(quotation_no.to_string()),
            category: Some("valves".to_string()),
            product_id: Some("P-100".to_string()),
            name: Some(name.to_string()),
            price: Some("1500".to_string()),
            quantity: Some("2".to_string()),
            customer_name: Some(customer_name.to_string()),
            email: Some("buyer@example.com".to_string()),
            phone: Some("+66 2 000 0000".to_string()),
            company: Some("Acme Co".to_string()),
            address: Some("1 Industrial Rd".to_string()),
            notes: Some("urgent".to_string()),
        }
    }

    fn service() -> (QuotationService, Arc<InMemoryTable>, Arc<InMemoryTable>) {
        let items = Arc::new(InMemoryTable::new(ITEM_COLUMNS));
        let customers = Arc::new(InMemoryTable::new(CUSTOMER_COLUMNS));
        let svc = QuotationService::new(items.clone(), customers.clone());
        (svc, items, customers)
    }

    #[tokio::test]
    async fn add_then_get_returns_item_and_customer_fields() {
        let (svc, _, _) = service();

        svc.add_item_and_customer(&payload("Q1", "Gate valve", "Somchai"))
            .await
            .unwrap();

        let q = svc.get_quotation("Q1").await.unwrap();
        assert_eq!(q.items.len(), 1);
        assert_eq!(q.items[0]["name"], "Gate valve");
        assert_eq!(q.items[0]["price"], "1500");
        assert_eq!(q.items[0]["quantity"], "2");
        assert_eq!(q.customer.name, "Somchai");
        assert_eq!(q.customer.company, "Acme Co");
        assert_eq!(q.customer.notes, "urgent");
    }

    #[tokio::test]
    async fn customer_first_write_wins_but_all_item_rows_appear() {
        let (svc, _, customers) = service();

        svc.add_item_and_customer(&payload("Q1", "Gate valve", "First"))
            .await
            .unwrap();
        svc.add_item_and_customer(&payload("Q1", "Ball valve", "Second"))
            .await
            .unwrap();

        assert_eq!(customers.row_count(), 1);

        let q = svc.get_quotation("Q1").await.unwrap();
        assert_eq!(q.customer.name, "First");
        assert_eq!(q.items.len(), 2);
    }

    #[tokio::test]
    async fn missing_payload_fields_become_empty_cells() {
        let (svc, _, _) = service();

        let payload = QuotePayload {
            quotation_no: Some("Q1".to_string()),
            name: Some("Gate valve".to_string()),
            ..QuotePayload::default()
        };
        svc.add_item_and_customer(&payload).await.unwrap();

        let q = svc.get_quotation("Q1").await.unwrap();
        assert_eq!(q.items[0]["price"], "");
        assert_eq!(q.items[0]["category"], "");
        assert_eq!(q.customer, Customer::default());
    }

    #[tokio::test]
    async fn get_unknown_quotation_is_not_found() {
        let (svc, _, _) = service();

        svc.add_item_and_customer(&payload("Q1", "Gate valve", "Somchai"))
            .await
            .unwrap();

        let err = svc.get_quotation("Q2").await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound));
    }

    #[tokio::test]
    async fn customer_defaults_to_empty_when_no_row_matches() {
        let (svc, items, _) = service();

        // Item row appended out-of-band: no customer row exists for it.
        items
            .append_row(vec!["Q9".into(), "".into(), "".into(), "Elbow".into()])
            .await
            .unwrap();

        let q = svc.get_quotation("Q9").await.unwrap();
        assert_eq!(q.customer, Customer::default());
        assert_eq!(q.items.len(), 1);
    }

    #[tokio::test]
    async fn list_is_sorted_deduplicated_and_excludes_empty() {
        let (svc, items, _) = service();

        for qno in ["Q2", "Q1", "Q1", ""] {
            items.append_row(vec![qno.to_string()]).await.unwrap();
        }

        let numbers = svc.list_quotation_numbers(None).await.unwrap();
        assert_eq!(numbers, vec!["Q1".to_string(), "Q2".to_string()]);
    }

    #[tokio::test]
    async fn list_status_filter_is_case_insensitive_and_treats_missing_as_empty() {
        // A status column only exists in the sheet, never in the append path;
        // use a wider header to simulate it.
        let table = Arc::new(InMemoryTable::new(["quotation_no", "status"]));
        let svc = QuotationService::new(
            table.clone(),
            Arc::new(InMemoryTable::new(CUSTOMER_COLUMNS)),
        );

        table
            .append_row(vec!["Q1".into(), "Pending".into()])
            .await
            .unwrap();
        table
            .append_row(vec!["Q2".into(), "Accepted".into()])
            .await
            .unwrap();
        table.append_row(vec!["Q3".into()]).await.unwrap();

        let pending = svc.list_quotation_numbers(Some("pending")).await.unwrap();
        assert_eq!(pending, vec!["Q1".to_string()]);

        // Missing status compares as empty.
        let blank = svc.list_quotation_numbers(Some("")).await.unwrap();
        assert_eq!(blank, vec!["Q3".to_string()]);
    }

    #[tokio::test]
    async fn latest_quotation_number_is_lexicographic_max_under_prefix() {
        let (svc, items, _) = service();

        for qno in ["QT2506T-0001", "QT2506T-0003", "QT2506T-0002", "OTHER-9"] {
            items.append_row(vec![qno.to_string()]).await.unwrap();
        }

        let last = svc.latest_quotation_number("QT25").await.unwrap();
        assert_eq!(last.as_deref(), Some("QT2506T-0003"));

        let none = svc.latest_quotation_number("ZZ").await.unwrap();
        assert_eq!(none, None);
    }

    #[tokio::test]
    async fn concurrent_adds_may_duplicate_the_customer_row() {
        let (svc, _, customers) = service();

        // Known race: the check-then-append is not atomic, so two adds with
        // the same fresh quotation number may both append a customer row.
        // The invariant tested here is tolerance, not exactly-once.
        let pa = payload("Q1", "Gate valve", "A");
        let pb = payload("Q1", "Ball valve", "B");
        let a = svc.add_item_and_customer(&pa);
        let b = svc.add_item_and_customer(&pb);
        let (ra, rb) = tokio::join!(a, b);
        ra.unwrap();
        rb.unwrap();

        let rows = customers.row_count();
        assert!((1..=2).contains(&rows), "expected 1 or 2 customer rows, got {rows}");

        let q = svc.get_quotation("Q1").await.unwrap();
        assert_eq!(q.items.len(), 2);
        assert!(q.customer.name == "A" || q.customer.name == "B");
    }

    #[tokio::test]
    async fn store_errors_propagate_unchanged() {
        let unavailable = Arc::new(crate::store::UnavailableTable::new("no connection"));
        let svc = QuotationService::new(unavailable.clone(), unavailable);

        let err = svc.get_quotation("Q1").await.unwrap_err();
        assert!(matches!(err, ServiceError::Store(StoreError::Unavailable(_))));

        let err = svc
            .add_item_and_customer(&QuotePayload::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Store(StoreError::Unavailable(_))));
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn list_is_always_sorted_distinct_and_non_empty(
                qnos in proptest::collection::vec("[A-Z]{0,2}[0-9]{0,2}", 0..32)
            ) {
                let rt = tokio::runtime::Builder::new_current_thread()
                    .build()
                    .unwrap();

                let numbers = rt.block_on(async {
                    let items = Arc::new(InMemoryTable::new(ITEM_COLUMNS));
                    for qno in &qnos {
                        items.append_row(vec![qno.clone()]).await.unwrap();
                    }
                    let svc = QuotationService::new(
                        items,
                        Arc::new(InMemoryTable::new(CUSTOMER_COLUMNS)),
                    );
                    svc.list_quotation_numbers(None).await.unwrap()
                });

                let mut expected: Vec<String> =
                    qnos.iter().filter(|q| !q.is_empty()).cloned().collect();
                expected.sort();
                expected.dedup();

                prop_assert_eq!(numbers, expected);
            }
        }
    }
}
