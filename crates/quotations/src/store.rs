//! Tabular-store port.
//!
//! Both quotation tables (items, customers) are consumed through the same
//! two-operation interface: append one row, or read every data row back as a
//! header-keyed record. The spreadsheet backend lives in `quotevend-sheets`;
//! the in-memory implementation here backs dev mode and tests.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use thiserror::Error;

/// One data row, keyed by the table's header row. Cells are strings; a
/// missing key means the row was shorter than the header.
pub type Record = HashMap<String, String>;

/// Result type used across the store layer.
pub type StoreResult<T> = Result<T, StoreError>;

/// Store-level error.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The store was never connected (e.g. credential load failed at
    /// startup). Carries the original cause so every request can echo it.
    #[error("tabular store unavailable: {0}")]
    Unavailable(String),

    /// A request against the backend failed (transport or API error).
    #[error("tabular store request failed: {0}")]
    Backend(String),

    /// Credential or token-exchange failure.
    #[error("tabular store authentication failed: {0}")]
    Auth(String),
}

/// A single append-only table.
///
/// `append_row` enforces no uniqueness; `get_all_records` returns every data
/// row in insertion order. All read paths in the service go through
/// `get_all_records` and scan.
#[async_trait]
pub trait Table: Send + Sync {
    async fn append_row(&self, row: Vec<String>) -> StoreResult<()>;
    async fn get_all_records(&self) -> StoreResult<Vec<Record>>;
}

/// In-memory table for tests/dev: a fixed header plus appended rows.
#[derive(Debug)]
pub struct InMemoryTable {
    header: Vec<String>,
    rows: RwLock<Vec<Vec<String>>>,
}

impl InMemoryTable {
    pub fn new<I, S>(header: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            header: header.into_iter().map(Into::into).collect(),
            rows: RwLock::new(Vec::new()),
        }
    }

    /// Raw row count, header excluded. Test helper.
    pub fn row_count(&self) -> usize {
        self.rows.read().map(|r| r.len()).unwrap_or(0)
    }
}

#[async_trait]
impl Table for InMemoryTable {
    async fn append_row(&self, row: Vec<String>) -> StoreResult<()> {
        let mut rows = self
            .rows
            .write()
            .map_err(|_| StoreError::Backend("table lock poisoned".to_string()))?;
        rows.push(row);
        Ok(())
    }

    async fn get_all_records(&self) -> StoreResult<Vec<Record>> {
        let rows = self
            .rows
            .read()
            .map_err(|_| StoreError::Backend("table lock poisoned".to_string()))?;

        // zip truncates: short rows omit trailing keys, extra cells beyond
        // the header are dropped.
        Ok(rows
            .iter()
            .map(|row| {
                self.header
                    .iter()
                    .cloned()
                    .zip(row.iter().cloned())
                    .collect()
            })
            .collect())
    }
}

/// Table installed when the real backend could not be connected at startup.
///
/// The process keeps serving; every call fails with the captured cause, so
/// unavailability surfaces per request rather than crashing at boot.
#[derive(Debug, Clone)]
pub struct UnavailableTable {
    reason: String,
}

impl UnavailableTable {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

#[async_trait]
impl Table for UnavailableTable {
    async fn append_row(&self, _row: Vec<String>) -> StoreResult<()> {
        Err(StoreError::Unavailable(self.reason.clone()))
    }

    async fn get_all_records(&self) -> StoreResult<Vec<Record>> {
        Err(StoreError::Unavailable(self.reason.clone()))
    }
}
